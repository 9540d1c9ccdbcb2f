use super::record::{format_gp, DropRecord};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DropStats {
    pub count: usize,
    pub total: u64,
    pub average: u64,
}

impl DropStats {
    pub fn total_display(&self) -> String {
        format!("{} gp", format_gp(self.total))
    }

    pub fn average_display(&self) -> String {
        format!("{} gp", format_gp(self.average))
    }
}

/// Count, sum and truncated average of the given records.
pub fn compute_stats(records: &[DropRecord]) -> DropStats {
    let count = records.len();
    let total = records.iter().fold(0u64, |sum, record| sum.saturating_add(record.price_gp));
    let average = if count > 0 { total / count as u64 } else { 0 };

    DropStats { count, total, average }
}
