use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use chrono::Utc;
use tracing::trace;

use crate::{
    Result, ShareLock,
    model::StepModel,
    store::{StepStore, map_store_err},
};

/// In-memory step store.
///
/// Behaves like the flow API on update: steps are stamped with the flow id,
/// get an id when they have none and carry creation/update times.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    flows: ShareLock<HashMap<String, Vec<StepModel>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            flows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// number of stored flows
    pub fn len(&self) -> Result<usize> {
        Ok(self.flows.read().map_err(map_store_err)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl StepStore for MemStore {
    fn load_steps(
        &self,
        flow_id: &str,
    ) -> Result<Vec<StepModel>> {
        let flows = self.flows.read().map_err(map_store_err)?;
        let steps = flows.get(flow_id).cloned().unwrap_or_default();
        trace!(flow_id, steps = steps.len(), "load steps");
        Ok(steps)
    }

    fn update_steps(
        &self,
        flow_id: &str,
        steps: &[StepModel],
    ) -> Result<()> {
        let now = Utc::now();
        let stored = steps
            .iter()
            .map(|step| StepModel {
                id: Some(step.id.clone().unwrap_or_else(|| nanoid::nanoid!())),
                flow_id: Some(flow_id.to_string()),
                created_at: Some(step.created_at.unwrap_or(now)),
                updated_at: Some(now),
                ..step.clone()
            })
            .collect::<Vec<_>>();

        trace!(flow_id, steps = stored.len(), "update steps");
        let mut flows = self.flows.write().map_err(map_store_err)?;
        flows.insert(flow_id.to_string(), stored);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{MemStore, StepModel, StepStore};

    #[test]
    fn test_mem_store() {
        let store = MemStore::new();
        assert!(store.load_steps("f-1").unwrap().is_empty());
        assert!(store.is_empty().unwrap());

        let steps = vec![
            StepModel {
                id: Some("s-1".to_string()),
                step_order: 1,
                name: "Manager".to_string(),
                ..Default::default()
            },
            StepModel {
                step_order: 2,
                name: "Finance".to_string(),
                ..Default::default()
            },
        ];
        store.update_steps("f-1", &steps).unwrap();

        let loaded = store.load_steps("f-1").unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id.as_deref(), Some("s-1"));
        assert!(loaded[1].id.is_some());
        assert!(loaded.iter().all(|s| s.flow_id.as_deref() == Some("f-1")));
        assert!(loaded.iter().all(|s| s.created_at.is_some() && s.updated_at.is_some()));
        assert_eq!(store.len().unwrap(), 1);

        store.update_steps("f-1", &loaded[..1]).unwrap();
        let reloaded = store.load_steps("f-1").unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].created_at, loaded[0].created_at);
    }
}
