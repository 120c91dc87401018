use serde::Deserialize;

/// Where a bill sits on the path to becoming law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillStage {
    #[default]
    Introduced,
    PassedHouse,
    PassedSenate,
    ToPresident,
    BecameLaw,
}

impl BillStage {
    /// All stages in tracker order.
    pub const ALL: [BillStage; 5] = [
        BillStage::Introduced,
        BillStage::PassedHouse,
        BillStage::PassedSenate,
        BillStage::ToPresident,
        BillStage::BecameLaw,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            BillStage::Introduced => "Introduced",
            BillStage::PassedHouse => "Passed House",
            BillStage::PassedSenate => "Passed Senate",
            BillStage::ToPresident => "To President",
            BillStage::BecameLaw => "Became Law",
        }
    }

    /// True if `step` is at or before this stage.
    pub fn reached(self, step: BillStage) -> bool {
        step <= self
    }

    /// Fraction of the tracker completed, in `[0.0, 1.0]`.
    pub fn progress(self) -> f64 {
        let last = (Self::ALL.len() - 1) as f64;
        (self.index() as f64 / last).clamp(0.0, 1.0)
    }
}
