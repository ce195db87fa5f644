use async_trait::async_trait;

use super::{TherapistRow, TherapistTable, compare_ids};

/// Therapist table held in memory, for local runs and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTherapistTable {
    rows: Vec<TherapistRow>,
}

impl InMemoryTherapistTable {
    pub fn new(mut rows: Vec<TherapistRow>) -> Self {
        rows.sort_by(|a, b| compare_ids(&a.id, &b.id));
        Self { rows }
    }

    /// Rows with sequential ids starting at 1 and no stored slug.
    pub fn from_names(names: impl IntoIterator<Item = (String, String)>) -> Self {
        let rows = names
            .into_iter()
            .enumerate()
            .map(|(i, (first_name, last_name))| TherapistRow {
                id: (i + 1).to_string(),
                first_name: Some(first_name),
                last_name: Some(last_name),
                slug: None,
            })
            .collect();
        Self::new(rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl TherapistTable for InMemoryTherapistTable {
    async fn fetch_after(&self, limit: u32, after: Option<&str>) -> anyhow::Result<Vec<TherapistRow>> {
        let rows = self
            .rows
            .iter()
            .filter(|row| after.is_none_or(|after| compare_ids(&row.id, after).is_gt()))
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(rows)
    }
}
