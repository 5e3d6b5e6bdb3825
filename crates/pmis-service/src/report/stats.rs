//! Document statistics for the programme dashboard.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pmis_entity::document::{Discipline, Document, DocumentStatus, Phase};

/// A labelled count, for tabular output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    /// What is being counted.
    pub label: String,
    /// How many.
    pub count: u64,
}

/// Aggregate counts over a set of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of documents.
    pub total: u64,
    /// Documents per approval status.
    pub by_status: BTreeMap<String, u64>,
    /// Documents per phase.
    pub by_phase: BTreeMap<String, u64>,
    /// Documents per discipline.
    pub by_discipline: BTreeMap<String, u64>,
    /// Documents waiting for an approver.
    pub pending_approvals: u64,
    /// Documents flagged as the latest version.
    pub latest_versions: u64,
    /// Total file size in bytes.
    pub total_size_bytes: u64,
}

impl DocumentStats {
    /// Computes statistics over `documents`.
    ///
    /// Every status, phase and discipline appears in the maps, with zero
    /// counts where no document matches.
    pub fn collect(documents: &[Document]) -> Self {
        let mut stats = Self {
            by_status: DocumentStatus::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), 0))
                .collect(),
            by_phase: Phase::ALL
                .iter()
                .map(|p| (p.as_str().to_string(), 0))
                .collect(),
            by_discipline: Discipline::ALL
                .iter()
                .map(|d| (d.as_str().to_string(), 0))
                .collect(),
            ..Self::default()
        };

        for doc in documents {
            stats.total += 1;
            stats.total_size_bytes += doc.size_bytes;
            *stats.by_status.entry(doc.status.as_str().to_string()).or_default() += 1;
            *stats.by_phase.entry(doc.phase.as_str().to_string()).or_default() += 1;
            *stats
                .by_discipline
                .entry(doc.discipline.as_str().to_string())
                .or_default() += 1;
            if doc.status.is_awaiting_decision() {
                stats.pending_approvals += 1;
            }
            if doc.is_latest_version {
                stats.latest_versions += 1;
            }
        }
        stats
    }

    /// Flattened `(section, label, count)` rows for table output.
    pub fn rows(&self) -> Vec<(&'static str, CountEntry)> {
        let section = |name: &'static str, map: &BTreeMap<String, u64>| {
            map.iter()
                .map(|(label, &count)| {
                    (
                        name,
                        CountEntry {
                            label: label.clone(),
                            count,
                        },
                    )
                })
                .collect::<Vec<_>>()
        };

        let mut rows = vec![
            (
                "summary",
                CountEntry {
                    label: "Total".to_string(),
                    count: self.total,
                },
            ),
            (
                "summary",
                CountEntry {
                    label: "Pending approvals".to_string(),
                    count: self.pending_approvals,
                },
            ),
            (
                "summary",
                CountEntry {
                    label: "Latest versions".to_string(),
                    count: self.latest_versions,
                },
            ),
        ];
        rows.extend(section("status", &self.by_status));
        rows.extend(section("phase", &self.by_phase));
        rows.extend(section("discipline", &self.by_discipline));
        rows
    }
}
