use anyhow::Result;
use campus_data_synth::{
    cli::{Cli, Commands},
    config::{DefectPolicy, GeneratorConfig},
    filter::resolve_sites,
    generator::{run, validate},
    reference::SITES,
    schema::{get_table, table_names},
    writer::open_sink,
};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            output_dir,
            format,
            seed,
            as_of,
            include,
            exclude,
            policy,
        } => {
            let start = Instant::now();

            let sites = resolve_sites(include, exclude)?;

            let mut config = GeneratorConfig {
                seed,
                ..Default::default()
            };
            if let Some(date) = as_of {
                config.as_of = date;
            }
            if let Some(path) = policy {
                config.policy = DefectPolicy::from_json_file(&path)?;
            }

            validate(&config)?;

            println!("Generating data for {} sites (seed {})", sites.len(), seed);
            let mut sink = open_sink(format, &output_dir)?;
            let summary = run(&config, &sites, sink.as_mut())?;

            for site in &summary.sites {
                println!("\n--- {} ---", site.site);
                println!(
                    "  Students:    {} records ({} duplicated)",
                    site.students, site.student_duplicates
                );
                println!("  Courses:     {} records", site.courses);
                println!(
                    "  Assessments: {} records ({} duplicated)",
                    site.assessments, site.assessment_duplicates
                );
            }

            println!(
                "\nWrote {} records to {:?} in {:.1}s",
                summary.total_rows(),
                output_dir,
                start.elapsed().as_secs_f64()
            );
            println!("\nIssues introduced:");
            println!("  - Missing values (gender, phone, DOB, credits, marks, attendance)");
            println!("  - Duplicate student and assessment records");
            println!("  - Outliers in marks (values > 100 or < 0)");
            println!("  - Inconsistent formats (dates, gender, course codes)");
            println!("  - Noisy text (extra spaces, casing typos)");
        }

        Commands::ListTables => {
            println!("Available tables:\n");
            for name in table_names() {
                let Some(table) = get_table(name) else {
                    continue;
                };
                println!("  {}", table.name);
                for col in table.columns {
                    let null = if col.nullable { " (nullable)" } else { "" };
                    println!("    {:<16} {}{}", col.name, col.col_type.sql_type(), null);
                }
            }
        }

        Commands::ListSites => {
            println!("Sites:\n");
            for site in SITES {
                println!(
                    "  {:<8} {}  (IDs from {})",
                    site.name(),
                    site.id_prefix(),
                    site.student_id(1)
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
