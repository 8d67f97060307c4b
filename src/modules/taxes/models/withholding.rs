use serde::Serialize;

/// Withholding rate commonly applied to Thai service payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WithholdingRatePreset {
    /// Percent of the subtotal
    pub rate: u32,
    pub label: &'static str,
}

// 3% covers most freelance services; 1-2% transport/advertising; 5% rent.
pub const WITHHOLDING_RATE_PRESETS: [WithholdingRatePreset; 5] = [
    WithholdingRatePreset { rate: 0, label: "No withholding" },
    WithholdingRatePreset { rate: 1, label: "1%" },
    WithholdingRatePreset { rate: 2, label: "2%" },
    WithholdingRatePreset { rate: 3, label: "3%" },
    WithholdingRatePreset { rate: 5, label: "5%" },
];
