mod dto;

use std::fmt;
use std::fmt::Arguments;
use std::fmt::Debug;
use std::fs;
use std::fs::File;
use std::io;
use std::io::ErrorKind;
use std::io::Write;
use std::path::PathBuf;

use dto::FingeringDto;
use fretboard::chord;
use fretboard::instrument;
use fretboard::instrument::Instrument;
use fretboard::pitch::PitchClass;
use fretboard::scale;
use fretboard::search;
use fretboard::search::SearchOptions;
use structopt::StructOpt;

#[derive(StructOpt)]
struct MainOptions {
    /// Write output to a file instead of stdout
    #[structopt(long = "--of")]
    output_file: Option<PathBuf>,

    #[structopt(subcommand)]
    command: MainCommand,
}

#[derive(StructOpt)]
enum MainCommand {
    /// List the chord catalog
    #[structopt(name = "chords")]
    Chords,

    /// List the tuning catalog
    #[structopt(name = "tunings")]
    Tunings(TuningsOptions),

    /// List the scale catalog
    #[structopt(name = "scales")]
    Scales,

    /// Find ranked fingerings for a chord symbol
    #[structopt(name = "find")]
    Find(FindOptions),

    /// Write one JSON fingering file per chord and root
    #[structopt(name = "cache")]
    Cache(CacheOptions),
}

#[derive(StructOpt)]
struct TuningsOptions {
    /// Only list tunings with the given string count
    #[structopt(short = "s")]
    string_count: Option<usize>,
}

#[derive(StructOpt)]
struct FindOptions {
    /// Chord symbol, e.g. C, F#m or Ebdim7
    symbol: String,

    #[structopt(flatten)]
    instrument_params: InstrumentOptions,

    #[structopt(flatten)]
    search_params: SearchParams,

    /// Print at most this many fingerings
    #[structopt(short = "n")]
    limit: Option<usize>,
}

#[derive(StructOpt)]
struct CacheOptions {
    /// Directory the JSON files are written to
    cache_dir: PathBuf,

    #[structopt(flatten)]
    instrument_params: InstrumentOptions,

    #[structopt(flatten)]
    search_params: SearchParams,
}

#[derive(StructOpt)]
struct InstrumentOptions {
    /// Tuning the instrument is built from
    #[structopt(long = "tuning", default_value = "Guitar Standard")]
    tuning: String,

    /// MIDI number the tuning's cumulative intervals start at
    #[structopt(long = "start-note", default_value = "40")]
    start_note: i32,

    /// Number of frets
    #[structopt(long = "frets", default_value = "22")]
    fret_count: i32,
}

#[derive(StructOpt)]
struct SearchParams {
    /// Largest span in frets between the lowest and highest fretted position
    #[structopt(long = "span", default_value = "4")]
    max_span: i32,

    /// Allow chord tones to be doubled on additional strings or omitted
    #[structopt(long = "doubling")]
    doubling: bool,
}

impl InstrumentOptions {
    fn build(&self) -> CliResult<Instrument> {
        let tuning = instrument::tuning_by_name(&self.tuning)
            .ok_or_else(|| CliError::CommandError(format!("Unknown tuning '{}'", self.tuning)))?;
        Ok(Instrument::new(self.start_note, self.fret_count, tuning))
    }
}

impl SearchParams {
    fn to_options(&self) -> SearchOptions {
        SearchOptions {
            max_span: self.max_span,
            allow_doubling: self.doubling,
        }
    }
}

type CliResult<T> = Result<T, CliError>;

enum CliError {
    IoError(io::Error),
    CommandError(String),
}

impl From<String> for CliError {
    fn from(v: String) -> Self {
        CliError::CommandError(v)
    }
}

impl From<io::Error> for CliError {
    fn from(v: io::Error) -> Self {
        CliError::IoError(v)
    }
}

impl Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError(err) => write!(f, "IO error / {}", err),
            CliError::CommandError(err) => write!(f, "The command failed / {}", err),
        }
    }
}

fn main() -> CliResult<()> {
    let options = MainOptions::from_args();

    let stdout = io::stdout();
    let output: Box<dyn Write> = match options.output_file {
        Some(output_file) => Box::new(File::create(output_file)?),
        None => Box::new(stdout.lock()),
    };

    let stderr = io::stderr();
    let error = Box::new(stderr.lock());

    let mut app = App { output, error };

    match app.run(options.command) {
        // The BrokenPipe case occurs when stdout tries to communicate with a process that
        // has already terminated. The results are repeatable, so terminate successfully.
        Err(CliError::IoError(err)) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

struct App<'a> {
    output: Box<dyn 'a + Write>,
    error: Box<dyn 'a + Write>,
}

impl App<'_> {
    fn run(&mut self, command: MainCommand) -> CliResult<()> {
        match command {
            MainCommand::Chords => self.list_chords()?,
            MainCommand::Tunings(TuningsOptions { string_count }) => {
                self.list_tunings(string_count)?
            }
            MainCommand::Scales => self.list_scales()?,
            MainCommand::Find(FindOptions {
                symbol,
                instrument_params,
                search_params,
                limit,
            }) => self.find_fingerings(&symbol, instrument_params, search_params, limit)?,
            MainCommand::Cache(CacheOptions {
                cache_dir,
                instrument_params,
                search_params,
            }) => self.build_cache(cache_dir, instrument_params, search_params)?,
        }
        Ok(())
    }

    fn list_chords(&mut self) -> CliResult<()> {
        for spelling in chord::chords() {
            let formula = spelling
                .tones()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let aliases = spelling
                .aliases()
                .iter()
                .filter(|alias| !alias.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(",");
            self.writeln(format_args!(
                "{:<16} | {:<12} | {}",
                spelling.name(),
                aliases,
                formula
            ))?;
        }
        Ok(())
    }

    fn list_tunings(&mut self, string_count: Option<usize>) -> CliResult<()> {
        for tuning in instrument::tunings() {
            if let Some(count) = string_count {
                if tuning.string_count() != count {
                    continue;
                }
            }
            let intervals = tuning
                .intervals()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            self.writeln(format_args!(
                "{:<20} | {} strings | {}",
                tuning.name(),
                tuning.string_count(),
                intervals
            ))?;
        }
        Ok(())
    }

    fn list_scales(&mut self) -> CliResult<()> {
        for scale in scale::scales() {
            let intervals = scale
                .intervals()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            self.writeln(format_args!("{:<20} | {}", scale.name(), intervals))?;
        }
        Ok(())
    }

    fn find_fingerings(
        &mut self,
        symbol: &str,
        instrument_params: InstrumentOptions,
        search_params: SearchParams,
        limit: Option<usize>,
    ) -> CliResult<()> {
        let (root, spelling) = chord::parse_chord_symbol(symbol)?;
        let instrument = instrument_params.build()?;
        let result =
            search::find_fingerings(&instrument, spelling, root, search_params.to_options());

        self.errln(format_args!(
            "{} {} on {}: {} fingerings",
            root,
            spelling.name(),
            instrument.tuning_name(),
            result.fingerings.len(),
        ))?;

        for fingering in result.fingerings.iter().take(limit.unwrap_or(usize::MAX)) {
            let inversion = match fingering.inversion() {
                Some(inversion) => inversion.to_string(),
                None => "-".to_string(),
            };
            self.writeln(format_args!(
                "{} | playability {:>2} | extras {} | inversion {}",
                fingering,
                fingering.playability(),
                fingering.extras(),
                inversion,
            ))?;
        }
        Ok(())
    }

    fn build_cache(
        &mut self,
        cache_dir: PathBuf,
        instrument_params: InstrumentOptions,
        search_params: SearchParams,
    ) -> CliResult<()> {
        let instrument = instrument_params.build()?;
        fs::create_dir_all(&cache_dir)?;

        for spelling in chord::chords() {
            for root in 0..12 {
                let root = PitchClass::from_semitone(root);
                let result =
                    search::find_fingerings(&instrument, spelling, root, search_params.to_options());

                let file_name = format!(
                    "{}_{}_{}.json",
                    instrument.tuning_name(),
                    spelling.name(),
                    root.semitone()
                )
                .replace(' ', "_");
                let entries: Vec<_> = result
                    .fingerings
                    .iter()
                    .map(FingeringDto::from_fingering)
                    .collect();

                let json = serde_json::to_string(&entries).map_err(io::Error::from)?;
                fs::write(cache_dir.join(&file_name), json)?;

                self.errln(format_args!("{}: {}", file_name, entries.len()))?;
            }
        }
        Ok(())
    }

    fn writeln(&mut self, args: Arguments) -> io::Result<()> {
        writeln!(&mut self.output, "{}", args)
    }

    fn errln(&mut self, args: Arguments) -> io::Result<()> {
        writeln!(&mut self.error, "{}", args)
    }
}
