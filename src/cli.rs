use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use timecontrol::io::{DataInput, DataOutput, Logging};
use timecontrol::{TimeControlSchedule, TimeControlSegment, FORMAT_VERSION};

const DEFAULT: TimeControlSegment = TimeControlSegment::DEFAULT;

/// Inspect and write binary time control files
#[derive(Parser)]
#[clap(version)]
pub struct App {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a time control file and print it
    Show {
        file: PathBuf,
        #[clap(long = "format-version", default_value_t = FORMAT_VERSION)]
        format_version: i32,
        /// Print as JSON instead of clock notation
        #[clap(long)]
        json: bool,
    },
    /// Write a file with the same time control for both sides
    Uniform {
        file: PathBuf,
        /// Session time in milliseconds
        #[clap(long, default_value_t = DEFAULT.time_control(), allow_negative_numbers = true)]
        time: i32,
        #[clap(long, default_value_t = DEFAULT.moves_per_session(), allow_negative_numbers = true)]
        moves: i32,
        /// Increment per move in milliseconds
        #[clap(long, default_value_t = DEFAULT.increment(), allow_negative_numbers = true)]
        inc: i32,
        /// Fixed time per move in milliseconds, 0 for none
        #[clap(long = "move-time", default_value_t = DEFAULT.move_time(), allow_negative_numbers = true)]
        move_time: i32,
    },
    /// Write a file with the default time control
    #[clap(name = "default")]
    WriteDefault { file: PathBuf },
}

impl App {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let trace = self.verbose >= 3;
        match self.command {
            Command::Show {
                file,
                format_version,
                json,
            } => {
                let schedule = if trace {
                    read_schedule(&file, format_version, Logging)?
                } else {
                    read_schedule(&file, format_version, |r| r)?
                };
                if json {
                    println!("{}", serde_json::to_string_pretty(&schedule)?);
                } else {
                    println!("{}", schedule);
                }
            }
            Command::Uniform {
                file,
                time,
                moves,
                inc,
                move_time,
            } => {
                let mut schedule = TimeControlSchedule::new();
                schedule.set_uniform(time, moves, inc, move_time);
                save(&file, &schedule, trace)?;
            }
            Command::WriteDefault { file } => save(&file, &TimeControlSchedule::new(), trace)?,
        }
        Ok(())
    }
}

fn read_schedule<I: DataInput>(
    path: &Path,
    format_version: i32,
    wrap: impl FnOnce(BufReader<File>) -> I,
) -> anyhow::Result<TimeControlSchedule> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut input = wrap(BufReader::new(file));
    let mut schedule = TimeControlSchedule::new();
    schedule
        .read_from(&mut input, format_version)
        .with_context(|| format!("failed to read time controls from {}", path.display()))?;
    info!("Loaded time controls from {}", path.display());
    Ok(schedule)
}

fn save(path: &Path, schedule: &TimeControlSchedule, trace: bool) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    if trace {
        write_schedule(&mut Logging(&mut writer), schedule, path)?;
    } else {
        write_schedule(&mut writer, schedule, path)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(
        "Saved {} bytes of time controls to {}",
        schedule.encoded_len(),
        path.display()
    );
    Ok(())
}

fn write_schedule<O: DataOutput>(
    output: &mut O,
    schedule: &TimeControlSchedule,
    path: &Path,
) -> anyhow::Result<()> {
    schedule
        .write_to(output)
        .with_context(|| format!("failed to write time controls to {}", path.display()))
}
