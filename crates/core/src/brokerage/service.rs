use std::sync::Arc;

use crate::errors::Result;
use crate::money::RateTable;

use super::model::{BrokerageEvent, Holding, Instrument, NewBrokerageEvent};
use super::projector::{self, HoldingState};
use super::traits::{BrokerageEventRepositoryTrait, HoldingRepositoryTrait, InstrumentRepositoryTrait};

/// Result of one item in a batch event mutation (spec §4.2, §7 batch policy
/// `{updated, failed:[{id, detail}]}`).
pub struct BatchEventFailure {
    pub id: String,
    pub detail: String,
}

pub struct BatchEventResult {
    pub updated: usize,
    pub failed: Vec<BatchEventFailure>,
}

/// Orchestrates the Holding Projector against the repositories: appends
/// events, recomputes the affected `(account, instrument)` position, and
/// persists the new `Holding` row. Every mutation re-derives the holding
/// from the full event stream rather than patching it incrementally (spec
/// §9 "event replay vs. local inversion").
pub struct BrokerageService {
    events: Arc<dyn BrokerageEventRepositoryTrait>,
    holdings: Arc<dyn HoldingRepositoryTrait>,
    instruments: Arc<dyn InstrumentRepositoryTrait>,
}

impl BrokerageService {
    pub fn new(
        events: Arc<dyn BrokerageEventRepositoryTrait>,
        holdings: Arc<dyn HoldingRepositoryTrait>,
        instruments: Arc<dyn InstrumentRepositoryTrait>,
    ) -> Self {
        Self {
            events,
            holdings,
            instruments,
        }
    }

    async fn reporting_currency(&self, instrument_id: &str) -> Result<Instrument> {
        self.instruments.get_by_id(instrument_id).await
    }

    /// Recomputes and persists the `(account, instrument)` holding from its
    /// full event stream.
    pub async fn recompute_position(
        &self,
        account_id: &str,
        instrument_id: &str,
        rates: &RateTable,
    ) -> Result<Holding> {
        let instrument = self.reporting_currency(instrument_id).await?;
        let events = projector::sorted(self.events.list_for_position(account_id, instrument_id).await?);
        let steps = projector::replay(&events, &instrument.reporting_currency, rates, HoldingState::default())?;
        let final_state = steps.last().map(|s| s.state).unwrap_or_default();
        let holding: Holding = final_state.into();
        self.holdings.upsert(account_id, instrument_id, holding).await?;
        Ok(holding)
    }

    /// Validates and appends one event, then recomputes its position
    /// (spec §4.2).
    pub async fn create_event(&self, new_event: NewBrokerageEvent, rates: &RateTable) -> Result<BrokerageEvent> {
        new_event.validate()?;
        let seq = self
            .events
            .next_seq(&new_event.account_id, &new_event.instrument_id)
            .await?;
        let account_id = new_event.account_id.clone();
        let instrument_id = new_event.instrument_id.clone();
        let event = self.events.insert(new_event, seq).await?;
        // Recompute eagerly so InsufficientQuantity surfaces to the caller
        // as part of the same request rather than being discovered later.
        self.recompute_position(&account_id, &instrument_id, rates).await?;
        Ok(event)
    }

    /// Deletes an event and replays the whole remaining stream for its
    /// `(account, instrument)` pair (spec §4.2, §9).
    pub async fn delete_event(&self, event_id: &str, rates: &RateTable) -> Result<()> {
        let deleted = self.events.delete(event_id).await?;
        self.recompute_position(&deleted.account_id, &deleted.instrument_id, rates)
            .await?;
        Ok(())
    }

    /// Applies a list of new events inside one logical batch; a failure on
    /// one item (validation, insufficient quantity) does not abort the
    /// others (spec §7).
    pub async fn batch_create(
        &self,
        new_events: Vec<NewBrokerageEvent>,
        rates: &RateTable,
    ) -> BatchEventResult {
        let mut updated = 0;
        let mut failed = Vec::new();
        for (idx, new_event) in new_events.into_iter().enumerate() {
            let label = format!("{}:{}", new_event.account_id, new_event.instrument_id);
            match self.create_event(new_event, rates).await {
                Ok(_) => updated += 1,
                Err(e) => failed.push(BatchEventFailure {
                    id: idx.to_string(),
                    detail: format!("{label}: {e}"),
                }),
            }
        }
        BatchEventResult { updated, failed }
    }
}
