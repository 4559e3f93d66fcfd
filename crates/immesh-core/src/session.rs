//! Update session with supersession guard
//!
//! A host keeps one [`ModelSession`] alive across dataset updates. Each
//! update runs a full assembly pass; if a newer update starts while an
//! older pass is still decoding, the older pass's results are discarded
//! rather than applied over the newer list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use immesh_io::PixelDecode;

use crate::assembler::{assemble, Assembly, AssemblyOptions};
use crate::column::ModelColumn;
use crate::component::Component;
use crate::data_type::DataType;
use crate::error::AssemblyResult;
use crate::render::ComponentSink;

/// How an update pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The pass's components are now the session's current list
    Applied,
    /// A newer update started mid-pass; this pass's results were discarded
    Superseded,
}

/// Session state shared with the host across updates
pub struct ModelSession {
    decoder: Arc<dyn PixelDecode>,
    options: AssemblyOptions,
    generation: AtomicU64,
    current: RwLock<Assembly>,
}

impl ModelSession {
    pub fn new(decoder: Arc<dyn PixelDecode>) -> Self {
        Self::with_options(decoder, AssemblyOptions::default())
    }

    pub fn with_options(decoder: Arc<dyn PixelDecode>, options: AssemblyOptions) -> Self {
        Self {
            decoder,
            options,
            generation: AtomicU64::new(0),
            current: RwLock::new(Assembly::default()),
        }
    }

    /// Run an assembly pass for a dataset update
    ///
    /// The result is committed only if no newer update has started in the
    /// meantime; a stale pass reports [`UpdateOutcome::Superseded`] and
    /// leaves the current list untouched.
    pub async fn update(
        &self,
        columns: &[ModelColumn],
        preferred: &[DataType],
    ) -> AssemblyResult<UpdateOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let assembly = assemble(columns, preferred, self.decoder.as_ref(), &self.options).await?;

        let mut current = self.current.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "assembly pass superseded; discarding result");
            return Ok(UpdateOutcome::Superseded);
        }
        *current = assembly;
        Ok(UpdateOutcome::Applied)
    }

    /// The current component list, in tag-discovery order
    pub async fn components(&self) -> Vec<Component> {
        self.current.read().await.components.clone()
    }

    /// The current assembly including its dropped-field report
    pub async fn assembly(&self) -> Assembly {
        self.current.read().await.clone()
    }

    /// Hand the current component list to a rendering collaborator
    pub async fn publish(&self, sink: &mut dyn ComponentSink) {
        let current = self.current.read().await;
        sink.accept(&current.components);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::RoleFlags;

    struct NoopDecoder;

    #[async_trait::async_trait]
    impl PixelDecode for NoopDecoder {
        async fn decode(&self, _bytes: &[u8]) -> immesh_io::DecodeResult<immesh_io::PixelBuffer> {
            immesh_io::PixelBuffer::new(0, 0, Vec::new())
        }
    }

    fn tag_column(tags: &[&str]) -> ModelColumn {
        ModelColumn::new(
            RoleFlags::single(DataType::ComponentTags),
            tags.iter().map(|t| Some(t.to_string())).collect(),
        )
    }

    #[tokio::test]
    async fn test_update_applies_components() {
        let session = ModelSession::new(Arc::new(NoopDecoder));
        let columns = vec![tag_column(&["A", "B"])];
        let outcome = session
            .update(&columns, &[DataType::Coordinates])
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Applied);

        let components = session.components().await;
        let names: Vec<&str> = components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    /// Decoder that parks every decode until the test opens the gate.
    struct GatedDecoder {
        entered: tokio::sync::Notify,
        gate: tokio::sync::Notify,
    }

    #[async_trait::async_trait]
    impl PixelDecode for GatedDecoder {
        async fn decode(&self, _bytes: &[u8]) -> immesh_io::DecodeResult<immesh_io::PixelBuffer> {
            self.entered.notify_one();
            self.gate.notified().await;
            immesh_io::PixelBuffer::new(1, 1, vec![0, 0, 0, 100])
        }
    }

    #[tokio::test]
    async fn test_in_flight_pass_is_superseded_by_newer_update() {
        let decoder = Arc::new(GatedDecoder {
            entered: tokio::sync::Notify::new(),
            gate: tokio::sync::Notify::new(),
        });
        let session = Arc::new(ModelSession::new(decoder.clone()));

        // The old dataset carries a binary coordinate column, so its pass
        // blocks inside the gated decoder.
        let old = vec![
            tag_column(&["old"]),
            ModelColumn::new(
                RoleFlags::single(DataType::Coordinates),
                vec![Some("QUFBQQ==".to_string())],
            ),
        ];
        let new = vec![tag_column(&["new"])];

        let old_pass = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .update(&old, &[DataType::Coordinates])
                    .await
                    .unwrap()
            })
        };
        decoder.entered.notified().await;

        // A newer text-only update lands while the old pass is suspended.
        let outcome = session
            .update(&new, &[DataType::Coordinates])
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Applied);

        decoder.gate.notify_one();
        assert_eq!(old_pass.await.unwrap(), UpdateOutcome::Superseded);

        let names: Vec<String> = session
            .components()
            .await
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["new"]);
    }
}
