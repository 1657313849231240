//! The hard-coded model portfolio catalog.
//!
//! Each entry is the target allocation published by one model. The catalog is
//! the single source of truth for which portfolios exist; stored regression
//! results for names no longer listed here are pruned on the next run.

use super::portfolios_model::Portfolio;

/// Builds the full portfolio catalog.
///
/// Called once at startup; the result is shared immutably behind an `Arc`.
pub fn catalog() -> Vec<Portfolio> {
    vec![
        Portfolio::new("SPY", &[("SPY", 1.0)]),
        Portfolio::new(
            "ChatGPT-5.2",
            &[
                ("SPY", 0.15),
                ("QQQ", 0.10),
                ("VIG", 0.05),
                ("VEA", 0.10),
                ("EEM", 0.10),
                ("EWY", 0.05),
                ("IJR", 0.10),
                ("XLU", 0.05),
                ("XLP", 0.05),
                ("GLD", 0.06),
                ("GSG", 0.04),
                ("AGG", 0.10),
                ("HYG", 0.05),
            ],
        ),
        Portfolio::new(
            "ChatGPT-5.2 DeepResearch",
            &[
                ("SPY", 0.20),
                ("QQQ", 0.15),
                ("AVUV", 0.10),
                ("MTUM", 0.10),
                ("QUAL", 0.10),
                ("VEA", 0.10),
                ("VWO", 0.05),
                ("GLD", 0.05),
                ("DBC", 0.05),
                ("DBMF", 0.05),
                ("IEF", 0.05),
            ],
        ),
        Portfolio::new(
            "Claude Sonnet 4.5",
            &[
                ("VBR", 0.22),
                ("NVDA", 0.18),
                ("MSFT", 0.16),
                ("VTWG", 0.14),
                ("AVGO", 0.08),
                ("GOOGL", 0.07),
                ("GLD", 0.10),
                ("VGIT", 0.05),
            ],
        ),
        Portfolio::new(
            "Gemini-3",
            &[
                ("VGT", 0.35),
                ("KBWB", 0.20),
                ("SLV", 0.15),
                ("XLI", 0.15),
                ("TLT", 0.10),
                ("CASH", 0.05),
            ],
        ),
        Portfolio::new(
            "Meta AI",
            &[
                ("MSFT", 0.10),
                ("GOOGL", 0.10),
                ("NVDA", 0.10),
                ("JNJ", 0.10),
                ("KO", 0.10),
                ("VOO", 0.10),
                ("CSJ", 0.20),
                ("GLD", 0.10),
                ("VGLT", 0.10),
            ],
        ),
        Portfolio::new(
            "Grok",
            &[
                ("QQQ", 0.30),
                ("AVUV", 0.15),
                ("MTUM", 0.15),
                ("VWO", 0.15),
                ("VNQ", 0.10),
                ("GLD", 0.10),
                ("TLT", 0.05),
            ],
        ),
        Portfolio::new(
            "DeepSeek-V3",
            &[
                ("AVUV", 0.15),
                ("IMTM", 0.10),
                ("USMV", 0.10),
                ("QUAL", 0.10),
                ("DBMF", 0.15),
                ("KMLM", 0.10),
                ("DBC", 0.10),
                ("VNQI", 0.05),
                ("VTIP", 0.05),
                ("BIL", 0.05),
                ("ARKQ", 0.05),
            ],
        ),
        Portfolio::new(
            "Meta Ai Thinking",
            &[
                ("NVDA", 0.15),
                ("MSFT", 0.15),
                ("CRWD", 0.10),
                ("IWM", 0.10),
                // Dot notation here; the quote code becomes BRK-B on the wire.
                ("BRK.B", 0.10),
                ("JPM", 0.10),
                ("VNQ", 0.10),
                ("GLD", 0.10),
                ("CCJ", 0.05),
                ("LNG", 0.05),
            ],
        ),
        Portfolio::new(
            "Grok-Expert",
            &[
                ("VTI", 0.25),
                ("AVUV", 0.15),
                ("VXUS", 0.10),
                ("VWO", 0.10),
                ("QQQ", 0.10),
                ("BND", 0.10),
                ("VNQ", 0.10),
                ("GLD", 0.10),
            ],
        ),
        Portfolio::new(
            "DeepSeek-DeepThink",
            &[
                ("AVUV", 0.15),
                ("SPGP", 0.10),
                ("XLF", 0.08),
                ("XLI", 0.07),
                ("AVDV", 0.08),
                ("INDA", 0.07),
                ("VCIT", 0.10),
                ("TFLO", 0.07),
                ("HYG", 0.03),
                ("VNQ", 0.05),
                ("DBC", 0.03),
                ("URA", 0.02),
                ("KMLM", 0.05),
                ("JEPI", 0.05),
                ("SGOV", 0.05),
            ],
        ),
        Portfolio::new(
            "Gemini-3 DeepResearch",
            &[
                ("MADE", 0.20),
                ("DRLL", 0.15),
                ("QQQ", 0.15),
                ("VIG", 0.10),
                ("VXUS", 0.10),
                ("EWJ", 0.10),
                ("GLD", 0.10),
                ("BKLN", 0.10),
            ],
        ),
    ]
}
