mod error;
mod hackrf;
mod report;

use clap::error::ErrorKind;
use clap::Parser;
use error::{finish_run, CliError};
use fskpress_core::{
    run_sequence, Cadence, DeviceConfig, DryRunTransmitter, ModemConfig, PressBuilder,
    PressSequence, SequenceConfig, ThreadPacer, Transmitter,
};
use hackrf::HackRfTransfer;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fskpress")]
#[command(about = "Transmit a remote-like 2-FSK 'press' from HEX payload(s)")]
struct Cli {
    /// HEX payload(s) to send as separate presses (MSB-first)
    #[arg(value_name = "HEX", required = true)]
    hex: Vec<String>,

    /// Center frequency [Hz]
    #[arg(long, env = "FSKPRESS_FC", default_value_t = fskpress_core::DEFAULT_CENTER_FREQ)]
    fc: f64,

    /// Sample rate [S/s]
    #[arg(long, env = "FSKPRESS_FS", default_value_t = fskpress_core::DEFAULT_SAMPLE_RATE)]
    fs: f64,

    /// Samples per symbol
    #[arg(long, env = "FSKPRESS_SPS", default_value_t = fskpress_core::DEFAULT_SAMPLES_PER_SYMBOL)]
    sps: usize,

    /// FSK tone for a 0 bit [Hz]
    #[arg(long, env = "FSKPRESS_F0", default_value_t = fskpress_core::DEFAULT_F0_HZ, allow_negative_numbers = true)]
    f0: f64,

    /// FSK tone for a 1 bit [Hz]
    #[arg(long, env = "FSKPRESS_F1", default_value_t = fskpress_core::DEFAULT_F1_HZ, allow_negative_numbers = true)]
    f1: f64,

    /// TX (RF amplifier) gain
    #[arg(long, env = "FSKPRESS_TX_GAIN", default_value_t = fskpress_core::DEFAULT_TX_GAIN)]
    tx_gain: u32,

    /// IF gain
    #[arg(long, env = "FSKPRESS_IF_GAIN", default_value_t = fskpress_core::DEFAULT_IF_GAIN)]
    if_gain: u32,

    /// Baseband gain
    #[arg(long, env = "FSKPRESS_BB_GAIN", default_value_t = fskpress_core::DEFAULT_BB_GAIN)]
    bb_gain: u32,

    /// RF bandwidth [Hz]
    #[arg(long, env = "FSKPRESS_BW", default_value_t = fskpress_core::DEFAULT_BANDWIDTH)]
    bw: f64,

    /// Packets per second (start-to-start)
    #[arg(long, env = "FSKPRESS_PPS", conflicts_with = "period", allow_negative_numbers = true)]
    pps: Option<f64>,

    /// Start-to-start period [s] (default: ~0.01196)
    #[arg(long, env = "FSKPRESS_PERIOD", allow_negative_numbers = true)]
    period: Option<f64>,

    /// Packets per press
    #[arg(long, env = "FSKPRESS_PACKETS", default_value_t = fskpress_core::DEFAULT_PACKETS)]
    packets: usize,

    /// Repeat the whole payload list N times
    #[arg(long, env = "FSKPRESS_REPEAT", default_value_t = fskpress_core::DEFAULT_REPEAT)]
    repeat: usize,

    /// Gap between presses [s]
    #[arg(long = "press-gap", env = "FSKPRESS_PRESS_GAP", default_value_t = fskpress_core::DEFAULT_PRESS_GAP_SECS)]
    press_gap: f64,

    /// Synthesize and report, but do not touch the radio
    #[arg(long)]
    dry_run: bool,

    /// Program used to drive the HackRF
    #[arg(long, env = "FSKPRESS_HACKRF_TRANSFER", default_value = "hackrf_transfer")]
    hackrf_transfer: PathBuf,
}

impl Cli {
    fn modem_config(&self) -> ModemConfig {
        ModemConfig::new(self.fs, self.sps, self.f0, self.f1)
    }

    fn device_config(&self) -> DeviceConfig {
        DeviceConfig {
            center_freq: self.fc,
            sample_rate: self.fs,
            bandwidth: self.bw,
            tx_gain: self.tx_gain,
            if_gain: self.if_gain,
            bb_gain: self.bb_gain,
        }
    }

    fn sequence_config(&self) -> SequenceConfig {
        SequenceConfig {
            repeat: self.repeat,
            press_gap_secs: self.press_gap,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let modem = cli.modem_config();
    let device = cli.device_config();
    let sequence_cfg = cli.sequence_config();
    let press_gap = sequence_cfg.press_gap()?;

    let cadence = Cadence::resolve(cli.pps, cli.period, fskpress_core::DEFAULT_PERIOD_SECS)?;
    let builder = PressBuilder::new(modem, cadence, cli.packets)?;

    info!("{}", report::config_line(&modem, &device));
    info!("{}", report::cadence_line(cli.packets, &cadence, &sequence_cfg));

    let sequence = PressSequence::new(cli.hex, builder, sequence_cfg.repeat)?;

    let mut transmitter: Box<dyn Transmitter + Send> = if cli.dry_run {
        Box::new(DryRunTransmitter::new())
    } else {
        Box::new(HackRfTransfer::new(cli.hackrf_transfer))
    };

    let (mut pacer, cancel) = ThreadPacer::new();
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, stopping after the current press");
                interrupted.store(true, Ordering::SeqCst);
                cancel.cancel();
            }
        });
    }

    let outcome = tokio::task::spawn_blocking(move || {
        run_sequence(
            sequence,
            &device,
            press_gap,
            &mut *transmitter,
            &mut pacer,
            |item| {
                for line in report::press_heading(&item.index, &item.hex) {
                    info!("{}", line);
                }
                info!("{}", report::press_line(item.press.stats()));
            },
        )
    })
    .await?;

    let summary = finish_run(outcome, interrupted.load(Ordering::SeqCst))?;
    info!(
        "[done] {} press(es), {} samples",
        summary.presses, summary.samples
    );
    Ok(())
}
