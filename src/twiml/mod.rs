//! TwiML response documents.
//!
//! TwiML is the XML markup the telephony platform executes to control
//! a call: speak text, play media, gather digits, move callers in and
//! out of queues, bridge conferences, send texts. Handlers assemble a
//! [`TwimlDocument`] from typed verbs and return it directly; the
//! document renders itself with an XML declaration and escapes every
//! piece of interpolated text, so no handler ever formats raw XML.
//!
//! # Example
//! ```rust
//! use switchboard_gateway::twiml::{Gather, TwimlDocument};
//!
//! let xml = TwimlDocument::new()
//!     .gather(Gather::new("/menu").num_digits(1).say("For support, press 1"))
//!     .redirect("/menu")
//!     .to_xml();
//! assert!(xml.contains("<Gather action=\"/menu\""));
//! ```

use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::fmt::Write;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// HTTP method attribute carried by verbs that call back into us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// `<Gather>` verb: collect DTMF digits and post them to `action`.
#[derive(Debug, Clone)]
pub struct Gather {
    action: String,
    method: HttpMethod,
    num_digits: Option<u32>,
    prompts: Vec<String>,
}

impl Gather {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: HttpMethod::Post,
            num_digits: None,
            prompts: Vec::new(),
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn num_digits(mut self, digits: u32) -> Self {
        self.num_digits = Some(digits);
        self
    }

    /// Nested `<Say>` prompt spoken while gathering.
    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.prompts.push(text.into());
        self
    }
}

/// `<Enqueue>` verb: place the caller in a named queue.
#[derive(Debug, Clone)]
pub struct Enqueue {
    queue: String,
    wait_url: Option<String>,
    wait_url_method: Option<HttpMethod>,
}

impl Enqueue {
    pub fn new(queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            wait_url: None,
            wait_url_method: None,
        }
    }

    /// TwiML the platform loops over while the caller holds.
    pub fn wait_url(mut self, url: impl Into<String>) -> Self {
        self.wait_url = Some(url.into());
        self
    }

    pub fn wait_url_method(mut self, method: HttpMethod) -> Self {
        self.wait_url_method = Some(method);
        self
    }
}

/// `<Queue>` noun nested in `<Dial>`: pull the front caller from a queue.
#[derive(Debug, Clone)]
pub struct DialQueue {
    name: String,
    url: Option<String>,
}

impl DialQueue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    /// TwiML played to the queued caller right before the bridge
    /// connects (recording consent and the like).
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone)]
enum DialNoun {
    Queue(DialQueue),
    Conference(String),
}

/// `<Dial>` verb bridging the current call to a queue or conference.
#[derive(Debug, Clone)]
pub struct Dial {
    record: bool,
    noun: DialNoun,
}

impl Dial {
    pub fn queue(queue: DialQueue) -> Self {
        Self {
            record: false,
            noun: DialNoun::Queue(queue),
        }
    }

    pub fn conference(name: impl Into<String>) -> Self {
        Self {
            record: false,
            noun: DialNoun::Conference(name.into()),
        }
    }

    /// Record the bridged leg from answer.
    pub fn record(mut self, record: bool) -> Self {
        self.record = record;
        self
    }
}

#[derive(Debug, Clone)]
enum Verb {
    Say(String),
    Play(String),
    Pause(u32),
    Redirect {
        url: String,
        method: Option<HttpMethod>,
    },
    Gather(Gather),
    Enqueue(Enqueue),
    Dial(Dial),
    Sms(String),
}

/// An ordered TwiML `<Response>` document.
///
/// Verbs execute top to bottom on the platform; order is significant.
#[derive(Debug, Clone, Default)]
pub struct TwimlDocument {
    verbs: Vec<Verb>,
}

impl TwimlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Speak `text` to the caller.
    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.verbs.push(Verb::Say(text.into()));
        self
    }

    /// Play audio fetched from `url`.
    pub fn play(mut self, url: impl Into<String>) -> Self {
        self.verbs.push(Verb::Play(url.into()));
        self
    }

    /// Wait silently for `seconds`.
    pub fn pause(mut self, seconds: u32) -> Self {
        self.verbs.push(Verb::Pause(seconds));
        self
    }

    /// Hand call control to another TwiML URL (platform default POST).
    pub fn redirect(mut self, url: impl Into<String>) -> Self {
        self.verbs.push(Verb::Redirect {
            url: url.into(),
            method: None,
        });
        self
    }

    /// Redirect with an explicit fetch method.
    pub fn redirect_with_method(mut self, url: impl Into<String>, method: HttpMethod) -> Self {
        self.verbs.push(Verb::Redirect {
            url: url.into(),
            method: Some(method),
        });
        self
    }

    pub fn gather(mut self, gather: Gather) -> Self {
        self.verbs.push(Verb::Gather(gather));
        self
    }

    pub fn enqueue(mut self, enqueue: Enqueue) -> Self {
        self.verbs.push(Verb::Enqueue(enqueue));
        self
    }

    pub fn dial(mut self, dial: Dial) -> Self {
        self.verbs.push(Verb::Dial(dial));
        self
    }

    /// Queue a text message to the caller's number.
    pub fn sms(mut self, body: impl Into<String>) -> Self {
        self.verbs.push(Verb::Sms(body.into()));
        self
    }

    /// Render the document, declaration included.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str("<Response>");
        for verb in &self.verbs {
            render_verb(&mut xml, verb);
        }
        xml.push_str("</Response>");
        xml
    }
}

impl IntoResponse for TwimlDocument {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, "application/xml")],
            self.to_xml(),
        )
            .into_response()
    }
}

fn render_verb(xml: &mut String, verb: &Verb) {
    match verb {
        Verb::Say(text) => {
            let _ = write!(xml, "<Say>{}</Say>", escape_xml(text));
        }
        Verb::Play(url) => {
            let _ = write!(xml, "<Play>{}</Play>", escape_xml(url));
        }
        Verb::Pause(seconds) => {
            let _ = write!(xml, "<Pause length=\"{seconds}\"/>");
        }
        Verb::Redirect { url, method } => {
            match method {
                Some(method) => {
                    let _ = write!(
                        xml,
                        "<Redirect method=\"{}\">{}</Redirect>",
                        method.as_str(),
                        escape_xml(url)
                    );
                }
                None => {
                    let _ = write!(xml, "<Redirect>{}</Redirect>", escape_xml(url));
                }
            };
        }
        Verb::Gather(gather) => {
            let _ = write!(
                xml,
                "<Gather action=\"{}\" method=\"{}\"",
                escape_xml(&gather.action),
                gather.method.as_str()
            );
            if let Some(digits) = gather.num_digits {
                let _ = write!(xml, " numDigits=\"{digits}\"");
            }
            xml.push('>');
            for prompt in &gather.prompts {
                let _ = write!(xml, "<Say>{}</Say>", escape_xml(prompt));
            }
            xml.push_str("</Gather>");
        }
        Verb::Enqueue(enqueue) => {
            xml.push_str("<Enqueue");
            if let Some(url) = &enqueue.wait_url {
                let _ = write!(xml, " waitUrl=\"{}\"", escape_xml(url));
            }
            if let Some(method) = enqueue.wait_url_method {
                let _ = write!(xml, " waitUrlMethod=\"{}\"", method.as_str());
            }
            let _ = write!(xml, ">{}</Enqueue>", escape_xml(&enqueue.queue));
        }
        Verb::Dial(dial) => {
            xml.push_str("<Dial");
            if dial.record {
                xml.push_str(" record=\"record-from-answer\"");
            }
            xml.push('>');
            match &dial.noun {
                DialNoun::Queue(queue) => {
                    xml.push_str("<Queue");
                    if let Some(url) = &queue.url {
                        let _ = write!(xml, " url=\"{}\"", escape_xml(url));
                    }
                    let _ = write!(xml, ">{}</Queue>", escape_xml(&queue.name));
                }
                DialNoun::Conference(name) => {
                    let _ = write!(xml, "<Conference>{}</Conference>", escape_xml(name));
                }
            }
            xml.push_str("</Dial>");
        }
        Verb::Sms(body) => {
            let _ = write!(xml, "<Sms>{}</Sms>", escape_xml(body));
        }
    }
}

/// Escape text for use in XML content and attribute values.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
