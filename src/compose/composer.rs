use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::compose::catalog::default_parts;
use crate::compose::part::{BodyComposition, BodyPart, CompositionUpdate};
use crate::compose::store::{CompositorStore, InMemoryStore};
use crate::compose::validate::{CompositionValidation, validate_composition};
use crate::foundation::core::Canvas;
use crate::foundation::error::{SilhouetteError, SilhouetteResult};

/// Construction-time settings for [`BodyPartsComposer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposerConfig {
    /// Canvas assigned to every new composition.
    pub canvas: Canvas,
    /// Seed the store with [`default_parts`] on construction.
    pub seed_default_catalog: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::COMPOSITION,
            seed_default_catalog: true,
        }
    }
}

/// A part given either by catalog id or in full.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartRef {
    Id(String),
    Part(BodyPart),
}

/// One-shot composition request, as accepted by the `compose` command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub parts: Vec<PartRef>,
    #[serde(default)]
    pub base_image: Option<String>,
    #[serde(default)]
    pub canvas_size: Option<Canvas>,
}

/// Registry of body parts and compositions over an injectable store.
///
/// Lookups that miss return `None` or `false`. Compositions are never validated on write;
/// call [`BodyPartsComposer::validate_composition`] when overlap consistency matters.
#[derive(Debug)]
pub struct BodyPartsComposer<S: CompositorStore = InMemoryStore> {
    store: S,
    config: ComposerConfig,
    next_id: AtomicU64,
}

impl Default for BodyPartsComposer<InMemoryStore> {
    fn default() -> Self {
        Self::new(ComposerConfig::default())
    }
}

impl BodyPartsComposer<InMemoryStore> {
    /// Composer backed by a fresh [`InMemoryStore`].
    pub fn new(config: ComposerConfig) -> Self {
        Self::with_store(InMemoryStore::new(), config)
    }
}

impl<S: CompositorStore> BodyPartsComposer<S> {
    pub fn with_store(store: S, config: ComposerConfig) -> Self {
        if config.seed_default_catalog {
            let parts = default_parts();
            tracing::debug!(count = parts.len(), "seeding default part catalog");
            for part in parts {
                store.upsert_part(part);
            }
        }
        Self {
            store,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_all_body_parts(&self) -> Vec<BodyPart> {
        self.store.parts()
    }

    /// Parts whose category string equals `category` exactly.
    pub fn get_body_parts_by_category(&self, category: &str) -> Vec<BodyPart> {
        self.store
            .parts()
            .into_iter()
            .filter(|p| p.category.as_str() == category)
            .collect()
    }

    pub fn get_body_part(&self, id: &str) -> Option<BodyPart> {
        self.store.part(id)
    }

    /// Insert or overwrite by id. Rectangles and categories are stored as given.
    pub fn add_body_part(&self, part: BodyPart) {
        tracing::debug!(id = %part.id, category = %part.category, "add body part");
        self.store.upsert_part(part);
    }

    /// Create and store a composition holding a copy of `parts`.
    pub fn create_composition(
        &self,
        name: &str,
        parts: &[BodyPart],
        base_image: Option<String>,
    ) -> BodyComposition {
        self.insert_new(name, parts.to_vec(), base_image, self.config.canvas)
    }

    /// Allocate an id and store the finished composition in one write.
    fn insert_new(
        &self,
        name: &str,
        parts: Vec<BodyPart>,
        base_image: Option<String>,
        canvas_size: Canvas,
    ) -> BodyComposition {
        let id = format!("comp-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let composition = BodyComposition {
            id,
            name: name.to_string(),
            parts,
            base_image,
            canvas_size,
        };
        tracing::debug!(
            id = %composition.id,
            parts = composition.parts.len(),
            "create composition"
        );
        self.store.insert_composition(composition.clone());
        composition
    }

    pub fn get_composition(&self, id: &str) -> Option<BodyComposition> {
        self.store.composition(id)
    }

    pub fn get_all_compositions(&self) -> Vec<BodyComposition> {
        self.store.compositions()
    }

    /// Shallow-merge `update` onto the stored composition. `false` if `id` is unknown.
    pub fn update_composition(&self, id: &str, update: CompositionUpdate) -> bool {
        let mut update = Some(update);
        let found = self.store.modify_composition(id, &mut |c| {
            if let Some(u) = update.take() {
                u.apply_to(c);
            }
        });
        tracing::debug!(id, found, "update composition");
        found
    }

    pub fn delete_composition(&self, id: &str) -> bool {
        let removed = self.store.remove_composition(id);
        tracing::debug!(id, removed, "delete composition");
        removed
    }

    /// Resolve `request` against the registry and store the resulting composition.
    ///
    /// Unknown part ids are a validation error; overlaps are not checked here.
    pub fn compose(&self, request: ComposeRequest) -> SilhouetteResult<BodyComposition> {
        let mut parts = Vec::with_capacity(request.parts.len());
        for r in request.parts {
            match r {
                PartRef::Part(p) => parts.push(p),
                PartRef::Id(id) => {
                    let p = self.get_body_part(&id).ok_or_else(|| {
                        SilhouetteError::validation(format!("unknown body part id: {id}"))
                    })?;
                    parts.push(p);
                }
            }
        }
        let canvas = match request.canvas_size {
            Some(c) => Canvas::new(c.width, c.height)?,
            None => self.config.canvas,
        };

        let name = request.name.unwrap_or_else(|| "Composition".to_string());
        Ok(self.insert_new(&name, parts, request.base_image, canvas))
    }

    pub fn validate_composition(&self, composition: &BodyComposition) -> CompositionValidation {
        validate_composition(composition)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
