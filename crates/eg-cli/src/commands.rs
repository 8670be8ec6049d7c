use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eg_format::{
    Dataset, EgReaderOptions, EgWriterOptions, read_eg_with_options, write_eg_with_options,
};
use tracing::{info, info_span};

use eg_cli::summary::{DatasetSummary, summarize};

use crate::cli::{ConvertArgs, ExportArgs, InspectArgs, PresetArgs};

/// Outcome of a conversion.
pub struct ConvertResult {
    pub output: PathBuf,
    pub points: usize,
    pub variables: usize,
}

pub fn run_inspect(args: &InspectArgs) -> Result<DatasetSummary> {
    let dataset = read_input(&args.input, reader_options(&args.preset))?;
    Ok(summarize(&dataset))
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("convert", input = %args.input.display());
    let _guard = span.enter();

    let dataset = read_input(&args.input, EgReaderOptions::default())?;
    let mut options = EgWriterOptions::new()
        .with_number_format(args.fmt)
        .with_delimiter(args.delimiter.clone());
    if let Some(name) = &args.name {
        options = options.with_name(name.clone());
    }
    if let Some(shot) = args.shot {
        options = options.with_shot_no(shot);
    }
    write_eg_with_options(&args.output, &dataset, options)
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(output = %args.output.display(), format = %args.fmt, "wrote EG file");

    Ok(ConvertResult {
        output: args.output.clone(),
        points: dataset.num_points(),
        variables: dataset.data_vars.len(),
    })
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let dataset = read_input(&args.input, reader_options(&args.preset))?;
    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &dataset).context("serialize dataset")?;
            writer.flush()?;
            info!(output = %path.display(), "exported dataset");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &dataset).context("serialize dataset")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn reader_options(preset: &PresetArgs) -> EgReaderOptions {
    match (&preset.diag, preset.shot) {
        (Some(diag), Some(shot)) => EgReaderOptions::for_diagnostic(diag, shot),
        _ => EgReaderOptions::default(),
    }
}

fn read_input(path: &Path, options: EgReaderOptions) -> Result<Dataset> {
    let dataset = read_eg_with_options(path, options)
        .with_context(|| format!("read {}", path.display()))?;
    info!(
        input = %path.display(),
        dims = dataset.dims.len(),
        variables = dataset.data_vars.len(),
        "read EG file"
    );
    Ok(dataset)
}
