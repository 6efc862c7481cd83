use crate::cli::{OutputFormat, ParseArgs};
use crate::engine::CancellationToken;
use crate::issue::Report;
use crate::parser::create_parser;
use crate::source::{FileReaderFactory, ReaderFactory, StringReaderFactory};
use anyhow::Context;
use std::io::Read;
use tracing::{debug, info};

pub fn execute(args: ParseArgs) -> anyhow::Result<()> {
    let parser = create_parser(&args.parser)?;
    let cancel = CancellationToken::new();

    let factories: Vec<Box<dyn ReaderFactory>> = if args.files.is_empty() {
        let mut content = Vec::new();
        std::io::stdin()
            .read_to_end(&mut content)
            .context("Failed to read stdin")?;
        vec![Box::new(
            StringReaderFactory::new("<stdin>", content).with_encoding(args.encoding),
        )]
    } else {
        args.files
            .iter()
            .map(|path| Box::new(FileReaderFactory::new(path, args.encoding)) as Box<dyn ReaderFactory>)
            .collect()
    };

    let mut report = Report::new();
    for factory in &factories {
        debug!("Parsing {} with {}", factory.file_name(), parser.id());
        let file_report = parser.parse(factory.as_ref(), &cancel)?;
        info!(
            "{}: {} issues",
            factory.file_name(),
            file_report.len()
        );
        report.merge(file_report);
    }
    report.assign_fingerprints();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            for issue in report.iter() {
                println!("{}", issue);
            }
            let counts = report.counts();
            println!(
                "\n{} issues: {} error, {} high, {} normal, {} low",
                counts.total(),
                counts.error,
                counts.high,
                counts.normal,
                counts.low
            );
        }
    }

    Ok(())
}
