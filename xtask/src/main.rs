use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err as fs;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by themefix.
    PrintSchemas,
    /// Scaffold a minimal theme layout to run the stabilizer against.
    InitTheme {
        #[arg(long, default_value = ".")]
        dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", themefix_types::schema::THEMEFIX_AUDIT_V1);
            println!("{}", themefix_types::schema::THEMEFIX_FIX_V1);
        }
        Command::InitTheme { dir } => {
            for sub in ["assets", "layout", "snippets", "sections", "locales"] {
                fs::create_dir_all(format!("{dir}/{sub}"))
                    .with_context(|| format!("create {dir}/{sub}"))?;
            }
            write_if_absent(
                &format!("{dir}/layout/theme.liquid"),
                "<html><head><title>{{ shop.name }}</title></head><body>{{ content_for_layout }}</body></html>\n",
            )?;
            write_if_absent(
                &format!("{dir}/snippets/card-product.liquid"),
                "<div class=\"card card--product\">{{ product.title }}</div>\n",
            )?;
            write_if_absent(&format!("{dir}/locales/en.default.json"), "{}\n")?;
            write_if_absent(&format!("{dir}/assets/base.css"), "")?;
            println!("initialized theme skeleton in {dir}");
        }
    }
    Ok(())
}

fn write_if_absent(path: &str, contents: &str) -> anyhow::Result<()> {
    if std::path::Path::new(path).exists() {
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("write {path}"))
}
