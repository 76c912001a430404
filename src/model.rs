//! Chat message data model.
//!
//! Mirrors the JSON produced by the research assistant frontend:
//!
//! ```json
//! {"role": "assistant", "content": {"sections": [{"type": "heading", "content": "Result"}]}}
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Who authored a message
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn assistant_sections(sections: Vec<Section>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Structured(StructuredContent { sections }),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Message body: either plain text or an ordered list of sections
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Structured(StructuredContent),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct StructuredContent {
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// One structured fragment of an assistant message body.
///
/// Unknown `type` tags deserialize into [`Section::Other`] so a newer producer
/// never breaks rendering.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "RawSection", into = "RawSection")]
pub enum Section {
    Heading(Option<String>),
    Paragraph(Option<String>),
    NumberedList {
        lead: Option<String>,
        items: Vec<String>,
    },
    BulletList {
        lead: Option<String>,
        items: Vec<String>,
    },
    Equation(Option<String>),
    Other {
        kind: String,
        body: Option<String>,
    },
}

impl Section {
    /// Wire tag of this section
    pub fn kind(&self) -> &str {
        match self {
            Section::Heading(_) => "heading",
            Section::Paragraph(_) => "paragraph",
            Section::NumberedList { .. } => "numbered_list",
            Section::BulletList { .. } => "bullet_list",
            Section::Equation(_) => "equation",
            Section::Other { kind, .. } => kind,
        }
    }

    /// Raw body text, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            Section::Heading(body) | Section::Paragraph(body) | Section::Equation(body) => {
                body.as_deref()
            }
            Section::NumberedList { lead, .. } | Section::BulletList { lead, .. } => {
                lead.as_deref()
            }
            Section::Other { body, .. } => body.as_deref(),
        }
    }
}

/// Flat wire form of a section
#[derive(Serialize, Deserialize, Clone, Debug)]
struct RawSection {
    #[serde(rename = "type", default, deserialize_with = "kind_or_empty")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<String>>,
}

/// A missing or non-string tag becomes `""` and falls through to `Other`
fn kind_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(kind) => kind,
        _ => String::new(),
    })
}

impl From<RawSection> for Section {
    fn from(raw: RawSection) -> Self {
        let items = raw.items.unwrap_or_default();
        match raw.kind.as_str() {
            "heading" => Section::Heading(raw.content),
            "paragraph" => Section::Paragraph(raw.content),
            "numbered_list" => Section::NumberedList {
                lead: raw.content,
                items,
            },
            "bullet_list" => Section::BulletList {
                lead: raw.content,
                items,
            },
            "equation" => Section::Equation(raw.content),
            _ => Section::Other {
                kind: raw.kind,
                body: raw.content,
            },
        }
    }
}

impl From<Section> for RawSection {
    fn from(section: Section) -> Self {
        let kind = section.kind().to_string();
        let (content, items) = match section {
            Section::Heading(body) | Section::Paragraph(body) | Section::Equation(body) => {
                (body, None)
            }
            Section::NumberedList { lead, items } | Section::BulletList { lead, items } => {
                (lead, Some(items))
            }
            Section::Other { body, .. } => (body, None),
        };
        RawSection {
            kind,
            content,
            items,
        }
    }
}

/// A citation shown under an assistant answer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatSource {
    pub title: String,
    pub url: String,
}

impl ChatSource {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_string_content() {
        let msg: Message = serde_json::from_str(r#"{"role":"user","content":"What is $e^{i\\pi}$?"}"#)
            .unwrap();
        assert!(msg.is_user());
        assert_eq!(msg.content, MessageContent::Text("What is $e^{i\\pi}$?".to_string()));
    }

    #[test]
    fn test_parse_structured_sections() {
        let json = r#"{
            "role": "assistant",
            "content": {
                "sections": [
                    {"type": "heading", "content": "Overview"},
                    {"type": "paragraph", "content": "Some text"},
                    {"type": "numbered_list", "content": "Steps:", "items": ["one", "two"]},
                    {"type": "bullet_list", "items": ["a"]},
                    {"type": "equation", "content": "E = mc^2"},
                    {"type": "table", "content": "| a | b |"}
                ]
            }
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        let MessageContent::Structured(content) = msg.content else {
            panic!("expected structured content");
        };

        assert_eq!(content.sections.len(), 6);
        assert_eq!(content.sections[0], Section::Heading(Some("Overview".to_string())));
        assert_eq!(
            content.sections[2],
            Section::NumberedList {
                lead: Some("Steps:".to_string()),
                items: vec!["one".to_string(), "two".to_string()],
            }
        );
        assert_eq!(
            content.sections[3],
            Section::BulletList {
                lead: None,
                items: vec!["a".to_string()],
            }
        );
        assert_eq!(
            content.sections[5],
            Section::Other {
                kind: "table".to_string(),
                body: Some("| a | b |".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_sections_is_empty() {
        let msg: Message = serde_json::from_str(r#"{"role":"assistant","content":{}}"#).unwrap();
        assert_eq!(
            msg.content,
            MessageContent::Structured(StructuredContent::default())
        );
    }

    #[test]
    fn test_untagged_section_degrades_to_other() {
        let json = r#"{"role":"assistant","content":{"sections":[
            {"type":"heading","content":"ok"},
            {"content":"no tag"},
            {"type":7,"content":"numeric tag"}
        ]}}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        let MessageContent::Structured(content) = msg.content else {
            panic!("expected structured content");
        };
        assert_eq!(
            content.sections,
            vec![
                Section::Heading(Some("ok".to_string())),
                Section::Other {
                    kind: String::new(),
                    body: Some("no tag".to_string()),
                },
                Section::Other {
                    kind: String::new(),
                    body: Some("numeric tag".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = serde_json::from_str::<Message>(r#"{"role":"system","content":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_section_keeps_tag_on_serialize() {
        let section = Section::Other {
            kind: "callout".to_string(),
            body: Some("note".to_string()),
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["type"], "callout");
        assert_eq!(json["content"], "note");
        assert!(json.get("items").is_none());
    }

    #[test]
    fn test_section_body_and_kind() {
        let list = Section::BulletList {
            lead: Some("Notes".to_string()),
            items: vec![],
        };
        assert_eq!(list.kind(), "bullet_list");
        assert_eq!(list.body(), Some("Notes"));
        assert_eq!(Section::Equation(None).body(), None);
    }
}
