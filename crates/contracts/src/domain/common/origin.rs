use serde::{Deserialize, Serialize};

/// Источник данных записи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Создано вручную через приложение
    #[serde(rename = "app")]
    App,
    /// Загружено массовым CSV-импортом
    #[serde(rename = "csv-import")]
    CsvImport,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::App => "app",
            Origin::CsvImport => "csv-import",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "app" => Some(Origin::App),
            "csv-import" => Some(Origin::CsvImport),
            _ => None,
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
