use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Serialize, Serializer};

const SAMPLES: usize = 500;
const SWEEPS: usize = 6;
const VDS_STEP: f64 = 0.01;

/// Threshold voltage (V), transconductance (A/V²), channel-length modulation (1/V).
const VT: f64 = 1.0;
const K: f64 = 0.004;
const LAMBDA: f64 = 0.02;

/// Base-emitter drop (V), base resistor (Ω), current gain, saturation knee (V), Early voltage (V).
const VBE_ON: f64 = 0.7;
const R_BASE: f64 = 10_000.0;
const BETA: f64 = 100.0;
const VCE_KNEE: f64 = 0.1;
const V_EARLY: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Subtype {
    Nmos,
    Pmos,
    Npn,
    Pnp,
}

impl Subtype {
    fn name(self) -> &'static str {
        match self {
            Subtype::Nmos => "NMOS",
            Subtype::Pmos => "PMOS",
            Subtype::Npn => "NPN",
            Subtype::Pnp => "PNP",
        }
    }

    fn device_type(self) -> &'static str {
        match self {
            Subtype::Nmos | Subtype::Pmos => "MOSFET",
            Subtype::Npn | Subtype::Pnp => "BJT",
        }
    }

    fn terminals(self) -> [&'static str; 3] {
        match self {
            Subtype::Nmos | Subtype::Pmos => {
                ["Terminal 1: GATE", "Terminal 2: DRAIN", "Terminal 3: SOURCE"]
            }
            Subtype::Npn | Subtype::Pnp => {
                ["Terminal 1: BASE", "Terminal 2: COLLECTOR", "Terminal 3: EMITTER"]
            }
        }
    }

    fn axis_labels(self) -> [&'static str; 3] {
        match self {
            Subtype::Nmos | Subtype::Pmos => ["$V_{GS}$", "$V_{DS}$", "$I_D$"],
            Subtype::Npn | Subtype::Pnp => ["$V_{BE}$", "$V_{CE}$", "$I_C$"],
        }
    }

    /// Stepped control voltage of sweep `k`. P-type devices step down from 5 V.
    fn control_voltage(self, k: usize) -> f64 {
        let k = k as f64;
        match self {
            Subtype::Nmos => k,
            Subtype::Pmos => 5.0 - k,
            Subtype::Npn => 0.5 * k,
            Subtype::Pnp => 5.0 - 0.5 * k,
        }
    }

    /// Output current at the given control and sweep voltage. P-type devices
    /// are biased from the 5 V rail and their current is negated, as the
    /// tracer records it.
    fn output_current(self, control: f64, sweep: f64) -> f64 {
        match self {
            Subtype::Nmos => drain_current(control, sweep),
            Subtype::Pmos => -drain_current(5.0 - control, sweep),
            Subtype::Npn => collector_current(control, sweep),
            Subtype::Pnp => -collector_current(5.0 - control, sweep),
        }
    }
}

#[derive(Parser)]
#[command(about = "Write a synthetic curve-trace CSV in the tracer's format")]
struct Args {
    /// Device subtype to simulate
    #[arg(long, value_enum, default_value_t = Subtype::Nmos)]
    subtype: Subtype,
    /// Directory to write into
    #[arg(default_value = ".")]
    output_dir: PathBuf,
    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One body row, written with six decimals like the tracer's `%f`.
#[derive(Serialize)]
struct SampleRow {
    #[serde(serialize_with = "six_decimals")]
    gate: f64,
    #[serde(serialize_with = "six_decimals")]
    drain_voltage: f64,
    #[serde(serialize_with = "six_decimals")]
    drain_current: f64,
}

fn six_decimals<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{v:.6}"))
}

/// Collector current for an NPN-equivalent bias: base resistor, constant
/// gain, soft saturation knee and Early effect.
fn collector_current(vbe: f64, vce: f64) -> f64 {
    let base = (vbe - VBE_ON).max(0.0) / R_BASE;
    BETA * base * (1.0 - (-vce / VCE_KNEE).exp()) * (1.0 + vce / V_EARLY)
}

/// Square-law MOSFET drain current for an NMOS-equivalent bias.
fn drain_current(vgs: f64, vds: f64) -> f64 {
    let overdrive = vgs - VT;
    if overdrive <= 0.0 {
        return 0.0;
    }
    if vds < overdrive {
        K * (overdrive * vds - vds * vds / 2.0)
    } else {
        K / 2.0 * overdrive * overdrive * (1.0 + LAMBDA * vds)
    }
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// First `<Type>_<Subtype>_<n>.csv` that does not exist yet.
fn next_free_name(dir: &Path, subtype: Subtype) -> PathBuf {
    let mut n = 1;
    loop {
        let candidate = dir.join(format!("{}_{}_{n}.csv", subtype.device_type(), subtype.name()));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Write the three metadata rows and six sweeps.
fn write_trace<W: Write>(
    writer: &mut csv::Writer<W>,
    subtype: Subtype,
    rng: &mut SimpleRng,
) -> Result<()> {
    let type_field = format!("Type: {}", subtype.device_type());
    let subtype_field = format!("Subtype: {}", subtype.name());
    writer.write_record([type_field.as_str(), subtype_field.as_str(), ""])?;
    writer.write_record(subtype.terminals())?;
    writer.write_record(subtype.axis_labels())?;

    for k in 0..SWEEPS {
        let control = subtype.control_voltage(k);
        for i in 0..SAMPLES {
            let sweep = i as f64 * VDS_STEP;
            let current = subtype.output_current(control, sweep) + rng.gauss(0.0, 2e-4);
            writer.serialize(SampleRow {
                gate: control,
                drain_voltage: sweep,
                drain_current: current,
            })?;
        }
        log::debug!("Wrote sweep {k} at {control:.1} V");
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let output_path = next_free_name(&args.output_dir, args.subtype);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    write_trace(&mut writer, args.subtype, &mut rng)?;

    println!(
        "Wrote {SWEEPS} sweeps ({SAMPLES} samples each) to {}",
        output_path.display()
    );
    Ok(())
}
