// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool definition types
//!
//! These types describe tools to MCP clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool name, description and input schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Tool description
    pub description: String,

    /// Input schema (JSON Schema)
    pub input_schema: ToolInputSchema,
}

/// Input schema for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    /// Schema type (always "object")
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Property definitions
    pub properties: Value,

    /// Required properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// Helper to create a tool input schema
pub struct SchemaBuilder {
    properties: serde_json::Map<String, Value>,
    required: Vec<String>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            properties: serde_json::Map::new(),
            required: vec![],
        }
    }

    fn property(mut self, name: &str, schema: Value, required: bool) -> Self {
        self.properties.insert(name.to_string(), schema);
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add a string property
    pub fn string(self, name: &str, description: &str, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "string",
                "description": description
            }),
            required,
        )
    }

    /// Add a string property limited to fixed values
    pub fn enumeration(
        self,
        name: &str,
        description: &str,
        values: &[&str],
        required: bool,
    ) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "string",
                "description": description,
                "enum": values
            }),
            required,
        )
    }

    /// Add an integer property
    pub fn integer(self, name: &str, description: &str, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "integer",
                "description": description
            }),
            required,
        )
    }

    /// Add a boolean property
    pub fn boolean(self, name: &str, description: &str, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "boolean",
                "description": description
            }),
            required,
        )
    }

    /// Add an array property
    pub fn array(self, name: &str, description: &str, item_type: &str, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "array",
                "description": description,
                "items": {
                    "type": item_type
                }
            }),
            required,
        )
    }

    /// Add a free-form object property with string values
    pub fn object(self, name: &str, description: &str, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "type": "object",
                "description": description,
                "additionalProperties": { "type": "string" }
            }),
            required,
        )
    }

    /// Add a page content property: a string or an array of Telegraph nodes
    pub fn content(self, name: &str, description: &str, required: bool) -> Self {
        self.property(
            name,
            serde_json::json!({
                "description": description,
                "oneOf": [
                    { "type": "string" },
                    {
                        "type": "array",
                        "items": { "type": ["string", "object"] }
                    }
                ]
            }),
            required,
        )
    }

    /// Build the schema
    pub fn build(self) -> ToolInputSchema {
        ToolInputSchema {
            schema_type: "object".to_string(),
            properties: Value::Object(self.properties),
            required: self.required,
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builder_default() {
        let builder = SchemaBuilder::default();
        assert!(builder.properties.is_empty());
        assert!(builder.required.is_empty());
    }

    #[test]
    fn test_schema_builder_string_required() {
        let builder = SchemaBuilder::new().string("name", "The name field", true);

        assert!(builder.properties.contains_key("name"));
        assert!(builder.required.contains(&"name".to_string()));
    }

    #[test]
    fn test_schema_builder_integer_optional() {
        let builder = SchemaBuilder::new().integer("count", "The count field", false);

        assert!(!builder.required.contains(&"count".to_string()));
        let prop = builder.properties.get("count").unwrap();
        assert_eq!(prop["type"], "integer");
    }

    #[test]
    fn test_schema_builder_enumeration() {
        let schema = SchemaBuilder::new()
            .enumeration("format", "Format", &["html", "markdown"], false)
            .build();
        assert_eq!(schema.properties["format"]["enum"][1], "markdown");
    }

    #[test]
    fn test_schema_builder_content_accepts_string_or_array() {
        let schema = SchemaBuilder::new().content("content", "Body", true).build();
        let one_of = schema.properties["content"]["oneOf"].as_array().unwrap();
        assert_eq!(one_of[0]["type"], "string");
        assert_eq!(one_of[1]["type"], "array");
        assert_eq!(schema.required, vec!["content"]);
    }

    #[test]
    fn test_schema_serializes_without_empty_required() {
        let schema = SchemaBuilder::new()
            .boolean("flag", "A flag", false)
            .array("tags", "Tags", "string", false)
            .object("fields", "Fields", false)
            .build();
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "object");
        assert!(json.get("required").is_none());
        assert_eq!(json["properties"]["tags"]["items"]["type"], "string");
    }
}
