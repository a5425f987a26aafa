//! Index schema definition for the frex search index.
//!
//! One Tantivy document per example:
//! - `id`: global example index (u64, indexed, stored, fast)
//! - `instance_id`: example instance id (string, stored)
//! - one tokenized text field per [`SearchField`], indexed with positions but not stored;
//!   display data always comes from the corpus

use tantivy::schema::{
    FAST, Field, INDEXED, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing,
    TextOptions,
};

use crate::{SearchField, analyzer::FREX_TOKENIZER};

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Global example index.
    pub id: Field,
    /// Example instance id.
    pub instance_id: Field,
    /// Text fields in [`SearchField::ALL`] order.
    text_fields: [Field; 7],
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let id = builder.add_u64_field("id", INDEXED | STORED | FAST);
        let instance_id = builder.add_text_field("instance_id", STRING | STORED);

        let text_options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(FREX_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );
        let text_fields = SearchField::ALL
            .map(|field| builder.add_text_field(field.name(), text_options.clone()));

        Self {
            schema: builder.build(),
            id,
            instance_id,
            text_fields,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The Tantivy handle of a search field.
    pub fn field(&self, field: SearchField) -> Field {
        let position = SearchField::ALL
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or_default();
        self.text_fields[position]
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use tantivy::schema::FieldType;

    use super::*;

    #[test]
    fn schema_has_all_fields() {
        let schema = IndexSchema::new();
        for name in ["id", "instance_id"] {
            assert!(schema.schema().get_field(name).is_ok(), "missing {name}");
        }
        for field in SearchField::ALL {
            let handle = schema.schema().get_field(field.name()).unwrap();
            assert_eq!(handle, schema.field(field));
        }
    }

    #[test]
    fn text_fields_use_frex_tokenizer() {
        let schema = IndexSchema::new();
        for field in SearchField::ALL {
            let entry = schema.schema().get_field_entry(schema.field(field));
            assert!(entry.is_indexed(), "{field} should be indexed");
            assert!(!entry.is_stored(), "{field} should not be stored");
            if let FieldType::Str(opts) = entry.field_type() {
                let indexing = opts.get_indexing_options().unwrap();
                assert_eq!(indexing.tokenizer(), FREX_TOKENIZER);
            } else {
                panic!("{field} should be a text field");
            }
        }
    }

    #[test]
    fn id_is_stored_and_fast() {
        let schema = IndexSchema::new();
        let entry = schema.schema().get_field_entry(schema.id);
        assert!(entry.is_stored());
        assert!(entry.is_fast());
        assert!(matches!(entry.field_type(), FieldType::U64(_)));
    }
}
