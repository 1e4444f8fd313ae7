//! Orbital wire shapes
//!
//! Requests are XML documents rooted at `<Request>`; the child element
//! names the operation. Replies come back as JSON wrapped in `{"Body": ...}`.

use crate::wire::{masked_pan, WireRequest};
use gateway_core::TransportError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Deserializer};
use std::io::Cursor;

/// `IndustryType` for card-not-present e-commerce
pub const INDUSTRY_TYPE_ECOMMERCE: &str = "EC";

/// `CardSecValInd` value when a CVV is sent
pub const CARD_SEC_VAL_PRESENT: &str = "1";

/// `NewOrder` message type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Authorization only
    Authorize,
    /// Refund against a prior order
    Refund,
}

impl MessageType {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Authorize => "A",
            MessageType::Refund => "R",
        }
    }
}

/// Merchant identity carried by every request
#[derive(Clone, PartialEq, Eq)]
pub struct Connection {
    /// Orbital connection username
    pub username: String,
    /// Orbital connection password
    pub password: String,
    /// Acquirer BIN (`000001` Salem, `000002` PNS)
    pub bin: String,
    /// Merchant id
    pub merchant_id: String,
    /// Terminal id
    pub terminal_id: String,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("bin", &self.bin)
            .field("merchant_id", &self.merchant_id)
            .field("terminal_id", &self.terminal_id)
            .finish()
    }
}

/// AVS block of a `NewOrder`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvsData {
    /// `AVSzip`
    pub zip: Option<String>,
    /// `AVSaddress1`
    pub address1: Option<String>,
    /// `AVSaddress2`
    pub address2: Option<String>,
    /// `AVScity`
    pub city: Option<String>,
    /// `AVSstate`
    pub state: Option<String>,
    /// `AVSname`
    pub name: Option<String>,
    /// `AVScountryCode`
    pub country_code: Option<String>,
}

/// `NewOrder` (authorize or refund)
#[derive(Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Merchant identity
    pub connection: Connection,
    /// `A` or `R`
    pub message_type: MessageType,
    /// PAN; empty on refunds by `TxRefNum`
    pub account_num: Option<String>,
    /// `MMYY`
    pub exp: Option<String>,
    /// ISO 4217 numeric currency
    pub currency_code: String,
    /// Minor-unit exponent
    pub currency_exponent: u32,
    /// CVV
    pub card_sec_val: Option<String>,
    /// AVS data
    pub avs: Option<AvsData>,
    /// Merchant order id
    pub order_id: String,
    /// Implied-decimal amount
    pub amount: u64,
    /// Prior transaction (refunds)
    pub tx_ref_num: Option<String>,
}

impl std::fmt::Debug for NewOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewOrder")
            .field("connection", &self.connection)
            .field("message_type", &self.message_type)
            .field("account_num", &self.account_num.as_deref().map(masked_pan))
            .field("exp", &self.exp)
            .field("currency_code", &self.currency_code)
            .field("card_sec_val", &self.card_sec_val.as_ref().map(|_| "***"))
            .field("avs", &self.avs)
            .field("order_id", &self.order_id)
            .field("amount", &self.amount)
            .field("tx_ref_num", &self.tx_ref_num)
            .finish()
    }
}

/// `MarkForCapture`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkForCapture {
    /// Merchant identity
    pub connection: Connection,
    /// Merchant order id of the authorization
    pub order_id: String,
    /// Implied-decimal amount to capture
    pub amount: u64,
    /// Authorization being captured
    pub tx_ref_num: String,
}

/// `Reversal` (void)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reversal {
    /// Merchant identity
    pub connection: Connection,
    /// Transaction being voided
    pub tx_ref_num: String,
    /// Merchant order id of the transaction
    pub order_id: String,
}

/// XML event writer over an in-memory buffer
struct XmlWriter {
    inner: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    fn new() -> Result<Self, TransportError> {
        let mut inner = Writer::new(Cursor::new(Vec::new()));
        inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        Ok(Self { inner })
    }

    fn start(&mut self, tag: &str) -> Result<(), TransportError> {
        self.inner
            .write_event(Event::Start(BytesStart::new(tag)))
            .map_err(|e| TransportError::Encode(e.to_string()))
    }

    fn end(&mut self, tag: &str) -> Result<(), TransportError> {
        self.inner
            .write_event(Event::End(BytesEnd::new(tag)))
            .map_err(|e| TransportError::Encode(e.to_string()))
    }

    fn element(&mut self, tag: &str, value: &str) -> Result<(), TransportError> {
        self.start(tag)?;
        self.inner
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(|e| TransportError::Encode(e.to_string()))?;
        self.end(tag)
    }

    fn optional(&mut self, tag: &str, value: Option<&str>) -> Result<(), TransportError> {
        match value {
            Some(value) => self.element(tag, value),
            None => Ok(()),
        }
    }

    fn connection(&mut self, connection: &Connection) -> Result<(), TransportError> {
        self.element("OrbitalConnectionUsername", &connection.username)?;
        self.element("OrbitalConnectionPassword", &connection.password)
    }

    fn merchant(&mut self, connection: &Connection) -> Result<(), TransportError> {
        self.element("BIN", &connection.bin)?;
        self.element("MerchantID", &connection.merchant_id)?;
        self.element("TerminalID", &connection.terminal_id)
    }

    fn finish(self) -> Vec<u8> {
        self.inner.into_inner().into_inner()
    }
}

/// Serialize a request body inside `<Request><{tag}>...</{tag}></Request>`
fn document<F>(tag: &str, body: F) -> Result<Vec<u8>, TransportError>
where
    F: FnOnce(&mut XmlWriter) -> Result<(), TransportError>,
{
    let mut writer = XmlWriter::new()?;
    writer.start("Request")?;
    writer.start(tag)?;
    body(&mut writer)?;
    writer.end(tag)?;
    writer.end("Request")?;
    Ok(writer.finish())
}

/// Orbital request that can be rendered as XML
pub trait OrbitalRequest: WireRequest {
    /// Operation element name
    const ELEMENT: &'static str;

    /// XML document bytes
    fn to_xml(&self) -> Result<Vec<u8>, TransportError>;
}

impl OrbitalRequest for NewOrder {
    const ELEMENT: &'static str = "NewOrder";

    fn to_xml(&self) -> Result<Vec<u8>, TransportError> {
        document(Self::ELEMENT, |w| {
            w.connection(&self.connection)?;
            w.element("IndustryType", INDUSTRY_TYPE_ECOMMERCE)?;
            w.element("MessageType", self.message_type.as_str())?;
            w.merchant(&self.connection)?;
            w.element("AccountNum", self.account_num.as_deref().unwrap_or(""))?;
            w.optional("Exp", self.exp.as_deref())?;
            w.element("CurrencyCode", &self.currency_code)?;
            w.element("CurrencyExponent", &self.currency_exponent.to_string())?;

            if let Some(cvv) = self.card_sec_val.as_deref() {
                w.element("CardSecValInd", CARD_SEC_VAL_PRESENT)?;
                w.element("CardSecVal", cvv)?;
            }

            if let Some(avs) = &self.avs {
                w.optional("AVSzip", avs.zip.as_deref())?;
                w.optional("AVSaddress1", avs.address1.as_deref())?;
                w.optional("AVSaddress2", avs.address2.as_deref())?;
                w.optional("AVScity", avs.city.as_deref())?;
                w.optional("AVSstate", avs.state.as_deref())?;
                w.optional("AVSname", avs.name.as_deref())?;
                w.optional("AVScountryCode", avs.country_code.as_deref())?;
            }

            w.element("OrderID", &self.order_id)?;
            w.element("Amount", &self.amount.to_string())?;
            w.optional("TxRefNum", self.tx_ref_num.as_deref())
        })
    }
}

impl OrbitalRequest for MarkForCapture {
    const ELEMENT: &'static str = "MarkForCapture";

    fn to_xml(&self) -> Result<Vec<u8>, TransportError> {
        document(Self::ELEMENT, |w| {
            w.connection(&self.connection)?;
            w.element("OrderID", &self.order_id)?;
            w.element("Amount", &self.amount.to_string())?;
            w.merchant(&self.connection)?;
            w.element("TxRefNum", &self.tx_ref_num)
        })
    }
}

impl OrbitalRequest for Reversal {
    const ELEMENT: &'static str = "Reversal";

    fn to_xml(&self) -> Result<Vec<u8>, TransportError> {
        document(Self::ELEMENT, |w| {
            w.connection(&self.connection)?;
            w.element("TxRefNum", &self.tx_ref_num)?;
            w.element("OrderID", &self.order_id)?;
            w.merchant(&self.connection)
        })
    }
}

impl WireRequest for NewOrder {
    fn transaction_reference(&self) -> Option<&str> {
        self.tx_ref_num.as_deref()
    }

    fn client_reference(&self) -> Option<&str> {
        Some(&self.order_id)
    }
}

impl WireRequest for MarkForCapture {
    fn transaction_reference(&self) -> Option<&str> {
        Some(&self.tx_ref_num)
    }

    fn client_reference(&self) -> Option<&str> {
        Some(&self.order_id)
    }
}

impl WireRequest for Reversal {
    fn transaction_reference(&self) -> Option<&str> {
        Some(&self.tx_ref_num)
    }

    fn client_reference(&self) -> Option<&str> {
        Some(&self.order_id)
    }
}

// =========================================================================
// RESPONSE
// =========================================================================

/// JSON reply envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrbitalResponse {
    /// Reply body
    #[serde(rename = "Body")]
    pub body: ResponseBody,
}

/// Reply body. Codes arrive as strings or bare numbers depending on the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResponseBody {
    /// `0` when the request was processed
    #[serde(deserialize_with = "string_or_number")]
    pub proc_status: String,
    /// Processing message
    #[serde(deserialize_with = "string_or_number")]
    pub status_msg: String,
    /// `1` approved, `0` declined, `2` message/system error
    #[serde(deserialize_with = "string_or_number")]
    pub approval_status: String,
    /// Issuer response code
    #[serde(deserialize_with = "string_or_number")]
    pub resp_code: String,
    /// Issuer response message
    #[serde(deserialize_with = "string_or_number")]
    pub resp_msg: String,
    /// Processor transaction reference
    #[serde(deserialize_with = "string_or_number")]
    pub tx_ref_num: String,
    /// Raw AVS code (space padded)
    #[serde(rename = "AVSRespCode", deserialize_with = "string_or_number")]
    pub avs_resp_code: String,
    /// Raw CVV code
    #[serde(rename = "CVV2RespCode", deserialize_with = "string_or_number")]
    pub cvv2_resp_code: String,
    /// Echoed order id
    #[serde(rename = "OrderID", deserialize_with = "string_or_number")]
    pub order_id: String,
    /// Issuer authorization code
    #[serde(deserialize_with = "string_or_number")]
    pub auth_code: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(if b { "1" } else { "0" }.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
