//! Cost model for normalized usage accounting
//!
//! Pure function from (model, token counts) to a USD cost string. Rates
//! are stored as integer micro-USD per million tokens and cost is computed
//! in integer arithmetic, so repeated pricing of the same counts can never
//! drift the way accumulated floating point would.

/// Cost string reported for models with no pricing entry
const UNKNOWN_MODEL_COST: &str = "0.00";

/// Per-model pricing, micro-USD per million tokens
struct ModelRate {
    model: &'static str,
    input_micro_per_mtok: u64,
    output_micro_per_mtok: u64,
}

/// Pricing table keyed by exact model identifier
const RATES: &[ModelRate] = &[
    ModelRate {
        model: "claude-sonnet-4",
        input_micro_per_mtok: 3_000_000,
        output_micro_per_mtok: 15_000_000,
    },
    ModelRate {
        model: "claude-haiku-3-5",
        input_micro_per_mtok: 800_000,
        output_micro_per_mtok: 4_000_000,
    },
    ModelRate {
        model: "gpt-4o",
        input_micro_per_mtok: 2_500_000,
        output_micro_per_mtok: 10_000_000,
    },
    ModelRate {
        model: "gpt-4o-mini",
        input_micro_per_mtok: 150_000,
        output_micro_per_mtok: 600_000,
    },
    ModelRate {
        model: "gemini-2.5-flash",
        input_micro_per_mtok: 300_000,
        output_micro_per_mtok: 2_500_000,
    },
    ModelRate {
        model: "gemini-2.5-pro",
        input_micro_per_mtok: 1_250_000,
        output_micro_per_mtok: 10_000_000,
    },
];

/// Compute the USD cost of a call as a fixed six-decimal string
///
/// Unknown models are not an error: cost is advisory, so the sentinel
/// `"0.00"` is returned and a diagnostic is logged.
pub fn cost(model: &str, input_tokens: u32, output_tokens: u32) -> String {
    let Some(rate) = RATES.iter().find(|r| r.model == model) else {
        tracing::warn!(model, "no pricing entry for model, reporting zero cost");
        return UNKNOWN_MODEL_COST.to_owned();
    };

    // Sum token * rate products before the single divide so no precision
    // is lost between the input and output terms.
    let micro_mtok = u128::from(input_tokens) * u128::from(rate.input_micro_per_mtok)
        + u128::from(output_tokens) * u128::from(rate.output_micro_per_mtok);
    let micros = micro_mtok / 1_000_000;

    format!("{}.{:06}", micros / 1_000_000, micros % 1_000_000)
}
