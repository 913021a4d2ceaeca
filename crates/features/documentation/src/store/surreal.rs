use super::{DocumentationStore, StoreError, StoreErrorExt};
use crate::model::{CodeSet, DocumentationSection, FeatureCode, FeatureDefinition, code_set};
use hrhub_database::Database;
use hrhub_domain::constants::{FEATURE_TABLE, SECTION_TABLE};
use surrealdb::types::SurrealValue;
use tracing::instrument;

const SECTION_PROJECTION: &str = "id.id() AS section_id, section_number, title, manual_code, \
     feature_codes ?? [] AS referenced_codes, \
     string::len(string::trim(content ?? '')) > 0 AS has_content";

#[derive(Debug, SurrealValue)]
struct FeatureRow {
    code: String,
    name: String,
    module_code: String,
    active: bool,
}

impl From<FeatureRow> for FeatureDefinition {
    fn from(row: FeatureRow) -> Self {
        Self {
            code: FeatureCode::new(row.code),
            name: row.name,
            module_code: row.module_code,
            active: row.active,
        }
    }
}

#[derive(Debug, SurrealValue)]
struct SectionRow {
    section_id: String,
    section_number: String,
    title: String,
    manual_code: String,
    referenced_codes: Vec<String>,
    has_content: bool,
}

impl From<SectionRow> for DocumentationSection {
    fn from(row: SectionRow) -> Self {
        Self {
            id: row.section_id,
            section_number: row.section_number,
            title: row.title,
            manual_code: row.manual_code,
            referenced_codes: code_set(row.referenced_codes),
            has_content: row.has_content,
        }
    }
}

/// [`DocumentationStore`] over the `feature` and `doc_section` tables.
///
/// Record keys are the public ids: `feature:<code>` and `doc_section:<section id>`. A section's
/// references live in the optional `feature_codes` array; `content` holds the body.
#[derive(Debug, Clone)]
pub struct SurrealDocumentationStore {
    db: Database,
}

impl SurrealDocumentationStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts or replaces a registry entry.
    ///
    /// # Errors
    /// Returns [`StoreError::Surreal`] if the write fails.
    pub async fn put_feature(&self, feature: &FeatureDefinition) -> Result<(), StoreError> {
        self.db
            .query(format!(
                "BEGIN TRANSACTION;
                DELETE {FEATURE_TABLE} WHERE id.id() = $code;
                CREATE {FEATURE_TABLE} CONTENT {{
                    id: $code,
                    name: $name,
                    module_code: $module_code,
                    active: $active
                }};
                COMMIT TRANSACTION;"
            ))
            .bind(("code", feature.code.as_str().to_owned()))
            .bind(("name", feature.name.clone()))
            .bind(("module_code", feature.module_code.clone()))
            .bind(("active", feature.active))
            .await
            .context("Storing feature")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Storing feature")?;
        Ok(())
    }

    /// Inserts or replaces a section with an optional body.
    ///
    /// `has_content` of the given section is ignored; it is derived from `content`.
    ///
    /// # Errors
    /// Returns [`StoreError::Surreal`] if the write fails.
    pub async fn put_section(
        &self,
        section: &DocumentationSection,
        content: Option<&str>,
    ) -> Result<(), StoreError> {
        self.db
            .query(format!(
                "BEGIN TRANSACTION;
                DELETE {SECTION_TABLE} WHERE id.id() = $id;
                CREATE {SECTION_TABLE} CONTENT {{
                    id: $id,
                    section_number: $section_number,
                    title: $title,
                    manual_code: $manual_code,
                    feature_codes: $codes,
                    content: $content ?? NONE
                }};
                COMMIT TRANSACTION;"
            ))
            .bind(("id", section.id.clone()))
            .bind(("section_number", section.section_number.clone()))
            .bind(("title", section.title.clone()))
            .bind(("manual_code", section.manual_code.clone()))
            .bind(("codes", codes_param(&section.referenced_codes)))
            .bind(("content", content.map(str::to_owned)))
            .await
            .context("Storing section")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Storing section")?;
        Ok(())
    }

    async fn select_sections(&self, condition: &str) -> Result<Vec<DocumentationSection>, StoreError> {
        let rows = self
            .db
            .query(format!(
                "SELECT {SECTION_PROJECTION} FROM {SECTION_TABLE} WHERE {condition} ORDER BY section_id"
            ))
            .await
            .context("Listing sections")?
            .take::<Vec<SectionRow>>(0)
            .context("Parsing sections")?;

        Ok(rows.into_iter().map(DocumentationSection::from).collect())
    }
}

impl DocumentationStore for SurrealDocumentationStore {
    #[instrument(skip(self))]
    async fn list_active_features(&self) -> Result<Vec<FeatureDefinition>, StoreError> {
        let rows = self
            .db
            .query(format!(
                "SELECT id.id() AS code, name, module_code, active FROM {FEATURE_TABLE} \
                 WHERE active = true ORDER BY code"
            ))
            .await
            .context("Listing active features")?
            .take::<Vec<FeatureRow>>(0)
            .context("Parsing features")?;

        Ok(rows.into_iter().map(FeatureDefinition::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_sections_with_references(&self) -> Result<Vec<DocumentationSection>, StoreError> {
        self.select_sections("array::len(feature_codes ?? []) > 0").await
    }

    #[instrument(skip(self))]
    async fn list_unmapped_sections(&self) -> Result<Vec<DocumentationSection>, StoreError> {
        self.select_sections("array::len(feature_codes ?? []) = 0").await
    }

    #[instrument(skip(self, codes), fields(codes = codes.len()))]
    async fn update_section_references(
        &self,
        section_id: &str,
        codes: &CodeSet,
    ) -> Result<(), StoreError> {
        let updated = self
            .db
            .query(format!(
                "LET $updated = (UPDATE {SECTION_TABLE} SET feature_codes = $codes WHERE id.id() = $id);
                RETURN array::len($updated);"
            ))
            .bind(("id", section_id.to_owned()))
            .bind(("codes", codes_param(codes)))
            .await
            .context("Updating section references")?
            .take::<Option<i64>>(1)
            .context("Updating section references")?
            .unwrap_or_default();

        if updated == 0 {
            return Err(StoreError::NotFound {
                message: section_id.to_owned().into(),
                context: Some(SECTION_TABLE.into()),
            });
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_section(&self, section_id: &str) -> Result<DocumentationSection, StoreError> {
        let row = self
            .db
            .query(format!("SELECT {SECTION_PROJECTION} FROM {SECTION_TABLE} WHERE id.id() = $id"))
            .bind(("id", section_id.to_owned()))
            .await
            .context("Reading section")?
            .take::<Vec<SectionRow>>(0)
            .context("Parsing section")?
            .into_iter()
            .next();

        row.map(DocumentationSection::from).ok_or_else(|| StoreError::NotFound {
            message: section_id.to_owned().into(),
            context: Some(SECTION_TABLE.into()),
        })
    }
}

fn codes_param(codes: &CodeSet) -> Vec<String> {
    codes.iter().map(|code| code.as_str().to_owned()).collect()
}
