use crate::cli::ParsersArgs;
use crate::parser::available_parsers;

pub fn execute(args: ParsersArgs) -> anyhow::Result<()> {
    let parsers = available_parsers();

    if args.json {
        println!("{}", serde_json::to_string_pretty(parsers)?);
        return Ok(());
    }

    let width = parsers.iter().map(|p| p.id.len()).max().unwrap_or(0);
    for parser in parsers {
        println!(
            "{:width$}  {} - {}",
            parser.id,
            parser.name,
            parser.description,
            width = width
        );
    }
    Ok(())
}
