use anyhow::{Context, Result};
use cisco_acl_core::parse_file;
use ciscp_convert::inspect::{inspect_lines, render_inspect};
use ciscp_convert::translate::{translate, TranslateOptions};

use crate::cli::{InspectArgs, OutputFormat};

pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let doc = parse_file(&args.input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    if args.objects {
        let translation = translate(&doc, &TranslateOptions::default());
        match args.format {
            OutputFormat::Text => {
                for object in translation.objects.iter() {
                    println!("{object}");
                }
            }
            OutputFormat::Json => {
                let objects: Vec<String> =
                    translation.objects.iter().map(|o| o.to_string()).collect();
                println!("{}", serde_json::to_string_pretty(&objects)?);
            }
        }
        return Ok(());
    }

    let dispositions = inspect_lines(&doc);
    match args.format {
        OutputFormat::Text => println!("{}", render_inspect(&dispositions)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dispositions)?),
    }

    Ok(())
}
