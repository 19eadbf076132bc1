//! Landing screen: headline counts and the latest interventions.

use crate::domain::{Intervention, RecordSet};

const RECENT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub interventions: usize,
    pub urgent: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub clients: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn from_records(records: &RecordSet) -> Self {
        let with_status =
            |status: &str| records.interventions.iter().filter(|i| i.status == status).count();
        Self {
            interventions: records.interventions.len(),
            urgent: records.interventions.iter().filter(|i| i.urgent).count(),
            in_progress: with_status("In corso"),
            completed: with_status("Completato"),
            clients: records.clients.len(),
        }
    }

    /// `(label, value)` pairs in display order.
    #[must_use]
    pub fn tiles(&self) -> [(&'static str, usize); 5] {
        [
            ("Interventions", self.interventions),
            ("Urgent", self.urgent),
            ("In progress", self.in_progress),
            ("Completed", self.completed),
            ("Clients", self.clients),
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    stats: Option<DashboardStats>,
    recent: Vec<Intervention>,
}

impl Dashboard {
    pub fn load(&mut self, records: &RecordSet) {
        self.stats = Some(DashboardStats::from_records(records));
        let mut recent = records.interventions.clone();
        recent.sort_by(|a, b| b.start_date.cmp(&a.start_date).then_with(|| a.code.cmp(&b.code)));
        recent.truncate(RECENT);
        self.recent = recent;
    }

    /// `None` until records arrive.
    #[must_use]
    pub const fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    /// Newest first.
    #[must_use]
    pub fn recent(&self) -> &[Intervention] {
        &self.recent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;

    #[test]
    fn stats_from_fixtures() {
        let mut dashboard = Dashboard::default();
        assert!(dashboard.stats().is_none());
        dashboard.load(&fixtures::record_set());
        let stats = dashboard.stats().copied().unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                interventions: 5,
                urgent: 2,
                in_progress: 2,
                completed: 2,
                clients: 3,
            }
        );
        assert_eq!(dashboard.recent()[0].code, "INT-00003");
    }
}
