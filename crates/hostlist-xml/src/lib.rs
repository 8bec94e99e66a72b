//! Parse the host list XML feed into one raw field list per `Item` node.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::{debug, trace};

/// Name of the repeatable element describing one host.
pub const ITEM_TAG: &str = "Item";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("xml: {0}")]
    Xml(String),
    #[error("invalid host list: {0}")]
    Invalid(String),
}

/// Raw `(tag, text)` pairs of the immediate children of one `Item` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemNode {
    pub fields: Vec<(String, String)>,
}

impl ItemNode {
    /// Text of the child element `name`, if the item carried one.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(tag, _)| tag == name)
            .map(|(_, text)| text.as_str())
    }

    fn push(&mut self, name: String, text: String) {
        // a repeated tag replaces the earlier value but keeps its position
        if let Some(slot) = self.fields.iter_mut().find(|(tag, _)| *tag == name) {
            slot.1 = text;
        } else {
            self.fields.push((name, text));
        }
    }
}

/// All `Item` nodes of a document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostList {
    pub items: Vec<ItemNode>,
}

impl HostList {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

struct OpenItem {
    depth: usize,
    node: ItemNode,
    child: Option<(String, String)>,
}

/// Parse a host list document and collect every `Item` node.
///
/// Items may appear at any depth. Only the immediate children of an item are
/// recorded; deeper elements contribute neither fields nor text.
pub fn parse(xml: &str) -> Result<HostList, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut open: Option<OpenItem> = None;
    let mut items = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                handle_start(&e, depth, &mut open);
            }
            Ok(Event::Empty(e)) => {
                depth += 1;
                handle_start(&e, depth, &mut open);
                handle_end(depth, &mut open, &mut items);
                depth = depth.saturating_sub(1);
            }
            Ok(Event::End(_)) => {
                handle_end(depth, &mut open, &mut items);
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(|err| XmlError::Xml(err.to_string()))?;
                handle_text(depth, &text, &mut open);
            }
            Ok(Event::CData(e)) => {
                let bytes = e.into_inner();
                let text = String::from_utf8_lossy(&bytes);
                handle_text(depth, text.trim(), &mut open);
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(XmlError::Xml(format!(
                    "at position {}: {err}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if open.is_some() {
        return Err(XmlError::Invalid(format!("unterminated <{ITEM_TAG}> element")));
    }
    debug!(items = items.len(), "parsed host list");
    Ok(HostList { items })
}

fn handle_start(event: &BytesStart<'_>, depth: usize, open: &mut Option<OpenItem>) {
    let name = String::from_utf8_lossy(event.name().as_ref()).into_owned();
    if let Some(item) = open.as_mut() {
        if depth == item.depth + 1 {
            item.child = Some((name, String::new()));
        }
    } else if name == ITEM_TAG {
        *open = Some(OpenItem {
            depth,
            node: ItemNode::default(),
            child: None,
        });
    }
}

fn handle_text(depth: usize, text: &str, open: &mut Option<OpenItem>) {
    if let Some(item) = open {
        if depth == item.depth + 1 {
            if let Some((_, value)) = item.child.as_mut() {
                value.push_str(text);
            }
        }
    }
}

fn handle_end(depth: usize, open: &mut Option<OpenItem>, items: &mut Vec<ItemNode>) {
    let Some(item) = open else {
        return;
    };
    if depth == item.depth + 1 {
        if let Some((name, text)) = item.child.take() {
            trace!(field = %name, value = %text, "item field");
            item.node.push(name, text);
        }
    } else if depth == item.depth {
        if let Some(done) = open.take() {
            items.push(done.node);
        }
    }
}
