use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use mbus_telegen::constants::CONFIRM_01_FRAME;
use mbus_telegen::generator::manual::is_quit;
use mbus_telegen::transport::{available_ports, open_serial, transmit_batch, SerialConfig};
use mbus_telegen::{
    encode_data, generate, init_logger, log_info, Code, GenerationMode, GeneratorConfig,
    ManualEntry, TelegramBatch, Transport,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "mbus-telegen")]
#[command(about = "DIB/VIB test telegram generator for M-Bus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON config file, flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    dib: Option<Code>,
    #[arg(long)]
    vib: Option<Code>,
    /// Payload of the first telegram
    #[arg(long)]
    data: Option<u64>,
    /// Codes per telegram on the enumerated axis
    #[arg(long)]
    group_size: Option<usize>,
    #[arg(long, value_delimiter = ',')]
    exclude_dib: Vec<Code>,
    #[arg(long, value_delimiter = ',')]
    exclude_vib: Vec<Code>,
    /// Header template, may contain one `{len}` slot
    #[arg(long)]
    header: Option<String>,
    #[arg(long)]
    footer: Option<String>,
    #[arg(long)]
    length_overhead: Option<u8>,
    /// VIFE for the extension mode
    #[arg(long)]
    extension: Option<Code>,
}

impl ConfigArgs {
    fn load(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(dib) = self.dib {
            config.dib = dib;
        }
        if let Some(vib) = self.vib {
            config.vib = vib;
        }
        if let Some(data) = self.data {
            config.data = data;
        }
        if let Some(size) = self.group_size {
            config.dib_group_size = size;
            config.vib_group_size = size;
        }
        if !self.exclude_dib.is_empty() {
            config.exclude_dib = self.exclude_dib.iter().copied().collect::<BTreeSet<_>>();
        }
        if !self.exclude_vib.is_empty() {
            config.exclude_vib = self.exclude_vib.iter().copied().collect::<BTreeSet<_>>();
        }
        if let Some(header) = &self.header {
            config.header = header.clone();
        }
        if let Some(footer) = &self.footer {
            config.footer = footer.clone();
        }
        if self.length_overhead.is_some() {
            config.length_overhead = self.length_overhead;
        }
        if self.extension.is_some() {
            config.extension = self.extension;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate DIB or VIB codes and print one telegram per group
    Generate {
        /// DIB, VIB_primary or VIB_single_extension
        #[arg(short, long, default_value = "DIB")]
        mode: String,
        #[command(flatten)]
        config: ConfigArgs,
        /// Write telegrams and records as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encode one payload for a DIB size class
    Encode { dib: Code, value: u64 },
    /// Read `DIB VIB DATA [EXT]` lines from stdin, print a telegram for each
    Manual {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Transmit a telegram, or a generated batch, over a serial port
    Send {
        #[arg(short, long)]
        port: String,
        #[arg(short, long, default_value = "115200")]
        baudrate: u32,
        /// Listen time after each telegram
        #[arg(long, default_value = "500")]
        wait_ms: u64,
        /// Generate a batch in this mode instead of sending TELEGRAM
        #[arg(short, long)]
        mode: Option<String>,
        /// Send the "Confirm 01" preset (1B 50 1B 51 01)
        #[arg(long, conflicts_with_all = ["mode", "telegram"])]
        confirm: bool,
        #[command(flatten)]
        config: ConfigArgs,
        telegram: Option<String>,
    },
    /// List serial ports
    Ports,
}

fn print_batch(batch: &TelegramBatch) {
    for telegram in batch.iter() {
        println!("{}", telegram.wire);
        println!("{}", telegram.describe());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            mode,
            config,
            output,
        } => {
            let mode: GenerationMode = mode.parse()?;
            let config = config.load()?;
            let batch = generate(&config, mode)?;
            print_batch(&batch);

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&batch)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?;
                log_info(&format!("records written to {}", path.display()));
            }
        }
        Commands::Encode { dib, value } => {
            let encoded = encode_data(dib, value)?;
            println!("{}", encoded.wire());
            println!("{}", encoded.truncated);
        }
        Commands::Manual { config } => {
            let template = config.load()?.frame_template()?;
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if is_quit(&line) {
                    break;
                }
                if line.trim().is_empty() {
                    continue;
                }
                match ManualEntry::parse(&line) {
                    Ok(entry) => {
                        let telegram = entry.to_telegram(&template);
                        println!("{}", telegram.wire);
                        println!("{}", telegram.describe());
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
        }
        Commands::Send {
            port,
            baudrate,
            wait_ms,
            mode,
            confirm,
            config,
            telegram,
        } => {
            let wait = Duration::from_millis(wait_ms);
            let mut transport = open_serial(&SerialConfig::new(port).with_baudrate(baudrate))?;

            let telegram = if confirm {
                Some(CONFIRM_01_FRAME.to_string())
            } else {
                telegram
            };

            let log = match (mode, telegram) {
                (Some(mode), None) => {
                    let batch = generate(&config.load()?, mode.parse()?)?;
                    transmit_batch(&mut transport, &batch, wait).await?
                }
                (None, Some(telegram)) => {
                    let mut log = vec![transport.transmit(&telegram).await?];
                    log.extend(transport.receive(wait).await?);
                    log
                }
                _ => bail!("give one of --mode, --confirm or a TELEGRAM"),
            };
            for entry in log {
                println!("{entry}");
            }
        }
        Commands::Ports => {
            for port in available_ports()? {
                println!("{port}");
            }
        }
    }

    Ok(())
}
