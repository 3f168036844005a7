/// A `GetPerson`-style reply carrying one person with two insights.
pub const PERSON_ENVELOPE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Header>
    <h:ServerVersionInfo xmlns:h="http://schemas.microsoft.com/exchange/services/2006/types" MajorVersion="15"/>
  </s:Header>
  <s:Body>
    <m:GetPersonResponseMessage ResponseClass="Success"
        xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages"
        xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
      <m:ResponseCode>NoError</m:ResponseCode>
      <m:Person>
        <t:DisplayName>Ann Smith</t:DisplayName>
        <t:EmailAddress>ann@contoso.com</t:EmailAddress>
        <t:Department>Research</t:Department>
        <t:Insights>
          <t:Insight>
            <t:InsightType>Skill</t:InsightType>
            <t:Rank>0.75</t:Rank>
            <t:Content xsi:type="t:SkillInsightValue">
              <t:InsightSource>Graph</t:InsightSource>
              <t:Name>Rust</t:Name>
            </t:Content>
          </t:Insight>
          <t:Insight>
            <t:InsightType>Note</t:InsightType>
            <t:Content xsi:type="t:StringInsightValue"><t:Data>On leave &amp; travelling</t:Data></t:Content>
          </t:Insight>
        </t:Insights>
      </m:Person>
    </m:GetPersonResponseMessage>
  </s:Body>
</s:Envelope>"#;

/// Diagnostic body a server sends alongside `503 Service Unavailable`.
pub const SERVER_BUSY_FAULT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><s:Fault><faultcode xmlns:a="http://schemas.microsoft.com/exchange/services/2006/types">a:ErrorServerBusy</faultcode><faultstring xml:lang="en-US">The server cannot service this request right now. Try again later.</faultstring><detail><e:BackOffMilliseconds xmlns:e="http://schemas.microsoft.com/exchange/services/2006/errors">297749</e:BackOffMilliseconds></detail></s:Fault></s:Body></s:Envelope>"#;
