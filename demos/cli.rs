use std::error;

use bibcite::{render, Locale, Parser};

use clap;
use clap::Parser as CLIParser;

#[cfg(not(feature = "serde_json"))]
#[derive(clap::Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Settings {
    /// Filepath to file to parse
    #[clap(short, long)]
    input: String,

    /// Return only the record with this citation key
    #[clap(short, long)]
    key: Option<String>,

    /// Citation language, “EN” or “DE”
    #[clap(short, long, default_value = "EN")]
    lang: String,

    /// Print IEEE-style reference lines instead of raw fields
    #[clap(short, long)]
    cite: bool,
}

#[cfg(feature = "serde_json")]
#[derive(clap::Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Settings {
    /// Filepath to file to parse
    #[clap(short, long)]
    input: String,

    /// Return only the record with this citation key
    #[clap(short, long)]
    key: Option<String>,

    /// Citation language, “EN” or “DE”
    #[clap(short, long, default_value = "EN")]
    lang: String,

    /// Print IEEE-style reference lines instead of raw fields
    #[clap(short, long)]
    cite: bool,

    #[clap(long)]
    json: bool,
}

fn print_human_readable(s: &Settings) -> Result<(), Box<dyn error::Error>> {
    let p = Parser::from_file(&s.input)?;
    for (key, record) in p.records() {
        if let Some(query) = &s.key {
            if query != &key {
                continue;
            }
        }
        println!("type = {}", record.kind);
        println!("key = {}", key);
        for (name, data) in record.fields.iter() {
            println!("\t{}\t= {}", name, data);
        }
    }

    Ok(())
}

fn print_citations(s: &Settings) -> Result<(), Box<dyn error::Error>> {
    let p = Parser::from_file(&s.input)?;
    let records = p.records();
    let locale = Locale::from_tag(&s.lang);

    // stable display order: keys sorted, indices assigned in sequence
    let mut keys: Vec<&String> = records.keys().collect();
    keys.sort();

    let mut index = 0;
    for key in keys {
        if let Some(query) = &s.key {
            if query != key {
                continue;
            }
        }
        index += 1;
        println!("{}", render(&records[key], index, locale));
    }

    Ok(())
}

#[cfg(feature = "serde_json")]
fn print_json(s: &Settings) -> Result<(), Box<dyn error::Error>> {
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    #[derive(Serialize, Deserialize)]
    struct Record {
        kind: String,
        key: String,
        fields: HashMap<String, String>,
    }

    #[derive(Serialize, Deserialize)]
    struct Records {
        data: Vec<Record>,
    }

    let mut out = Records { data: Vec::new() };
    for (_, record) in Parser::from_file(&s.input)?.records() {
        if let Some(query) = &s.key {
            if query != &record.key {
                continue;
            }
        }

        out.data.push(Record {
            kind: record.kind,
            key: record.key,
            fields: record.fields,
        });
    }

    println!("{}", serde_json::to_string(&out)?);

    Ok(())
}

fn main() -> Result<(), Box<dyn error::Error>> {
    let settings = Settings::parse();

    #[cfg(feature = "serde_json")]
    {
        if settings.json {
            print_json(&settings)?;
            return Ok(());
        }
    }

    if settings.cite {
        print_citations(&settings)?;
    } else {
        print_human_readable(&settings)?;
    }

    Ok(())
}
