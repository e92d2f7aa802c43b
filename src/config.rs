use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use serde::Deserialize;
use structopt::StructOpt;
use strum::VariantNames;
use toml;

use crate::locale::Language;

/// Settings for the command-line front end, merged from the arguments and
/// the optional config file. The library itself never reads these.
pub struct Config {
    pub materials: Vec<String>,
    pub lang: Option<Language>,
    pub data_dir: PathBuf,
}

lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}

impl Config {
    fn new() -> Self {
        let opt = Opt::from_args();

        let file: ConfigFile = match get_file_config(&opt.config_file) {
            Ok(config) => config,
            Err(e) => {
                println!("Error opening config file: {}", e);
                ConfigFile::default()
            }
        };

        let lang = if opt.lang.is_some() {
            opt.lang
        } else if let Some(code) = file.lang {
            code.parse().map_or_else(
                |_| {
                    println!(
                        "Config file: invalid language: {} (valid values are {})",
                        code,
                        Language::VARIANTS.join(", ")
                    );
                    None
                },
                Some,
            )
        } else {
            None
        };

        let data_dir = data_dir(&opt.data_dir.or(file.data_dir));

        Config {
            materials: opt.materials,
            lang,
            data_dir,
        }
    }
}

fn get_file_config(file: &Option<PathBuf>) -> Result<ConfigFile, Box<dyn std::error::Error>> {
    let mut file = File::open(config_file(file)?)?;
    let mut s = String::new();
    file.read_to_string(&mut s)?;
    Ok(toml::from_str(&s)?)
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    lang: Option<String>,
    data_dir: Option<PathBuf>,
}

#[derive(StructOpt, Debug)]
struct Opt {
    /// Display names of up to five ingredients, in pot order
    materials: Vec<String>,

    #[structopt(long, parse(from_os_str), help = &DATA_DIR_HELP)]
    data_dir: Option<PathBuf>,

    /// Language code for names and descriptions, e.g. "USen" or "EUfr".
    /// Defaults to "USen"
    #[structopt(long, parse(try_from_str = get_lang))]
    lang: Option<Language>,

    #[structopt(long, parse(from_os_str), help = &CONFIG_FILE_HELP)]
    config_file: Option<PathBuf>,
}

static DATA_DIR_HELP: Lazy<String> = Lazy::new(|| {
    format!(
        r#"Load the cooking data tables from this directory

Defaults to '{}'."#,
        data_dir(&None).display()
    )
});

static CONFIG_FILE_HELP: Lazy<String> = Lazy::new(|| {
    format!(
        r#"Read config options from this file. Supported options:

    lang = "<lang>"
    data_dir = "<path>"

The default file location is '{}'."#,
        config_file(&None).unwrap().display()
    )
});

fn get_lang<Language: FromStr + VariantNames>(
    code: &str,
) -> Result<Language, Box<dyn std::error::Error>> {
    Language::from_str(code).map_err(|_| {
        format!(
            "Invalid language: {} (valid values are {})",
            code,
            Language::VARIANTS.join(", ")
        )
        .into()
    })
}

fn data_dir(dir: &Option<PathBuf>) -> PathBuf {
    if let Some(dir) = dir {
        return dir.clone();
    }
    let local = PathBuf::from("data");
    if local.exists() {
        return local;
    }
    dirs::data_dir()
        .filter(|d| d.exists())
        .map(|mut data_dir| {
            data_dir.push("totk-cooking");
            data_dir
        })
        .unwrap_or(local)
}

fn config_file(file: &Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(file) = file {
        return Ok(file.clone());
    }
    dirs::config_dir()
        .filter(|d| d.exists())
        .map(|mut config_dir| {
            config_dir.push("totk-cooking");
            config_dir
        })
        .or_else(|| std::env::current_dir().ok())
        .map(|mut path| {
            path.push("totk-cooking.toml");
            path
        })
        .ok_or_else(|| "Failed to access current working directory".into())
}
