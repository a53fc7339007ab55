use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(author, version, about = "Plays a scripted toast bar session", long_about = None)]
pub struct Cli {
    /// Chemin du fichier de configuration TOML.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Scénario JSON des étapes à jouer sur la barre de toast.
    #[arg(long, value_name = "PATH")]
    pub script: PathBuf,

    /// Attend réellement chaque frame au lieu d'avancer un temps virtuel.
    #[arg(long, action = ArgAction::SetTrue)]
    pub realtime: bool,

    /// Force l'intervalle entre frames (ex. "8ms").
    #[arg(long, value_parser = parse_duration)]
    pub frame_interval: Option<Duration>,

    /// Utilise un layer JSON pour les logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Filtre de logs explicite (ex. "toastbar=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Affiche l'état final de la barre en JSON sur stdout.
    #[arg(long, action = ArgAction::SetTrue)]
    pub print_state: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
