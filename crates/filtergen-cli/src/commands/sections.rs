//! Section table for a single family/order design.

use clap::Args;
use filtergen_core::FilterFamily;
use filtergen_design::{
    AnalyticPoles, DEFAULT_RIPPLE_DB, DesignParams, rc_lowpass, sallen_key_equal_c,
    synthesize_sections,
};

#[derive(Args)]
pub struct SectionsArgs {
    /// Filter family (butterworth, chebyshev)
    #[arg(short, long)]
    family: FilterFamily,

    /// Filter order
    #[arg(short, long)]
    order: u32,

    /// Cutoff frequency in Hz
    #[arg(long, default_value = "1000")]
    cutoff: f64,

    /// Baseline capacitance in farads
    #[arg(long, default_value = "10e-9")]
    capacitance: f64,

    /// Chebyshev passband ripple in dB
    #[arg(long, default_value_t = DEFAULT_RIPPLE_DB)]
    ripple: f64,
}

pub fn run(args: SectionsArgs) -> anyhow::Result<()> {
    let params = DesignParams::new(args.cutoff, args.capacitance);
    params.validate()?;
    let sections = synthesize_sections(
        &AnalyticPoles::with_ripple(args.ripple),
        args.family,
        args.order,
    )?;

    println!(
        "{} order {} at {} Hz: {} section(s)\n",
        args.family,
        args.order,
        args.cutoff,
        sections.len()
    );
    println!(
        "{:<3} {:<11} {:>10} {:>12} {:>10}  components",
        "#", "block", "scale", "f0 (Hz)", "Q"
    );
    println!("{}", "-".repeat(64));

    for (k, section) in sections.iter().enumerate() {
        let (block, q, values) = match section.q {
            Some(q) => (
                "sallen-key",
                format!("{q:.4}"),
                sallen_key_equal_c(section.scale, q, &params)?,
            ),
            None => ("rc", "-".to_string(), rc_lowpass(section.scale, &params)),
        };
        println!(
            "{:<3} {:<11} {:>10.6} {:>12.3} {:>10}  {values}",
            k + 1,
            block,
            section.scale,
            section.frequency_hz(args.cutoff),
            q
        );
    }
    Ok(())
}
