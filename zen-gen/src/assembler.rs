//! Document assembly.
//!
//! One assembler builds both document shapes: the rich profile with
//! channels, operations and messages, and the schemas-only subset. The
//! profile only controls which sections are populated; the extraction
//! results feeding it are identical.

use indexmap::IndexMap;

use crate::document::{
    Channel, ChannelMessages, ComponentSchema, Components, Document, Info, Operation, RefObject,
    Reply, INFO_VERSION, SPEC_VERSION,
};
use crate::extractor::FunctionExtraction;

/// Which sections of the document to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentProfile {
    /// Channels, operations, messages and schemas.
    Full,

    /// `components.schemas` only.
    SchemasOnly,
}

/// Assembler from extraction results to a whole document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentAssembler {
    profile: DocumentProfile,
}

impl DocumentAssembler {
    /// Create an assembler for the given profile.
    pub fn new(profile: DocumentProfile) -> Self {
        DocumentAssembler { profile }
    }

    /// Assemble the document. The write-once result owns its inputs.
    pub fn assemble(
        &self,
        app_name: &str,
        schemas: IndexMap<String, ComponentSchema>,
        extraction: FunctionExtraction,
    ) -> Document {
        let mut document = Document {
            asyncapi: SPEC_VERSION.to_string(),
            info: Info {
                title: app_name.to_string(),
                version: INFO_VERSION.to_string(),
                description: extraction.module_doc.clone(),
            },
            channels: IndexMap::new(),
            operations: IndexMap::new(),
            components: Components {
                schemas,
                ..Components::default()
            },
        };

        if self.profile == DocumentProfile::SchemasOnly {
            return document;
        }

        for (name, function) in extraction.functions {
            document.channels.insert(
                name.clone(),
                RefObject::new(format!("#/components/channels/{name}")),
            );
            document.operations.insert(
                name.clone(),
                RefObject::new(format!("#/components/operations/{name}")),
            );

            document.components.channels.insert(
                name.clone(),
                Channel {
                    messages: ChannelMessages {
                        request: RefObject::new(format!("#/components/messages/{name}_request")),
                        response: RefObject::new(format!("#/components/messages/{name}_response")),
                    },
                },
            );

            document.components.operations.insert(
                name.clone(),
                Operation {
                    action: "receive".to_string(),
                    description: function.request.description.clone(),
                    channel: RefObject::new(format!("#/channels/{name}")),
                    messages: vec![RefObject::new(format!("#/channels/{name}/messages/request"))],
                    reply: Reply {
                        channel: RefObject::new(format!("#/channels/{name}")),
                        messages: vec![RefObject::new(format!(
                            "#/channels/{name}/messages/response"
                        ))],
                    },
                },
            );

            document
                .components
                .messages
                .insert(format!("{name}_request"), function.request);
            document
                .components
                .messages
                .insert(format!("{name}_response"), function.response);
        }

        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::SchemaExtractor;
    use crate::parser::SourceParser;

    const MODELS: &str = "class TaskAttachment(TypedDict):\n    name: str\n    kind: str\n";
    const FUNCTIONS: &str = r#""""module doc"""

def get_attachments(utd_id: int) -> list[TaskAttachment]:
    """
    Get attachments.
    Returns:
        Attachments
    """
    ...
"#;

    fn assemble(profile: DocumentProfile) -> Document {
        let parser = SourceParser::new();
        let extractor = SchemaExtractor::new();

        let models = parser.parse_module(MODELS).unwrap();
        let functions = parser.parse_module(FUNCTIONS).unwrap();

        DocumentAssembler::new(profile).assemble(
            "Zen",
            extractor.component_schemas(&models),
            extractor.extract_functions(&functions),
        )
    }

    #[test]
    fn test_full_document_top_level() {
        let document = assemble(DocumentProfile::Full);

        assert_eq!(document.asyncapi, "3.0.0");
        assert_eq!(document.info.title, "Zen");
        assert_eq!(document.info.version, "0.0.1");
        assert_eq!(document.info.description.as_deref(), Some("module doc"));
        assert_eq!(
            document.channels["get_attachments"].reference,
            "#/components/channels/get_attachments"
        );
        assert_eq!(
            document.operations["get_attachments"].reference,
            "#/components/operations/get_attachments"
        );
    }

    #[test]
    fn test_full_document_components() {
        let document = assemble(DocumentProfile::Full);

        let channel = &document.components.channels["get_attachments"];
        assert_eq!(
            channel.messages.request.reference,
            "#/components/messages/get_attachments_request"
        );
        assert_eq!(
            channel.messages.response.reference,
            "#/components/messages/get_attachments_response"
        );

        let operation = &document.components.operations["get_attachments"];
        assert_eq!(operation.action, "receive");
        assert!(operation.description.contains("Get attachments."));
        assert_eq!(operation.channel.reference, "#/channels/get_attachments");
        assert_eq!(
            operation.reply.messages[0].reference,
            "#/channels/get_attachments/messages/response"
        );

        assert!(document
            .components
            .messages
            .contains_key("get_attachments_request"));
        assert!(document
            .components
            .messages
            .contains_key("get_attachments_response"));
        assert!(document.components.schemas.contains_key("TaskAttachment"));
    }

    #[test]
    fn test_schemas_only_profile_is_a_subset() {
        let document = assemble(DocumentProfile::SchemasOnly);

        assert!(document.channels.is_empty());
        assert!(document.operations.is_empty());
        assert!(document.components.channels.is_empty());
        assert!(document.components.operations.is_empty());
        assert!(document.components.messages.is_empty());
        assert_eq!(document.components.schemas.len(), 1);

        // The omitted sections disappear from the serialized form.
        let yaml = serde_yaml::to_string(&document).unwrap();
        assert!(!yaml.contains("channels"));
        assert!(!yaml.contains("operations"));
        assert!(!yaml.contains("messages"));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let first = assemble(DocumentProfile::Full);
        let second = assemble(DocumentProfile::Full);
        assert_eq!(first, second);
        assert_eq!(
            serde_yaml::to_string(&first).unwrap(),
            serde_yaml::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_round_trips_through_yaml() {
        let document = assemble(DocumentProfile::Full);
        let yaml = serde_yaml::to_string(&document).unwrap();
        let reloaded: Document = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(document, reloaded);
    }
}
