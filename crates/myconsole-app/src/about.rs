//! Project information shown in the About dialog and `myconsole about`.

/// A person or organisation credited in the About dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credit {
    pub role: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub project_name: &'static str,
    pub version: &'static str,
    pub credits: Vec<Credit>,
    pub copyright: &'static str,
    pub publisher_link: &'static str,
}

impl AboutInfo {
    /// Information for this build
    pub fn current() -> Self {
        Self {
            project_name: "MyConsole",
            version: env!("CARGO_PKG_VERSION"),
            credits: vec![
                Credit {
                    role: "Publisher",
                    name: "Renowned Games",
                },
                Credit {
                    role: "Lead Developer",
                    name: "Tamerlan Shakirov",
                },
            ],
            copyright: "Copyright 2022 Renowned Games All rights reserved.",
            publisher_link: "https://assetstore.unity.com/publishers/26774",
        }
    }

    /// Text rendering, one entry per line
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.project_name.to_string(),
            format!("Version: {}", self.version),
        ];
        lines.extend(
            self.credits
                .iter()
                .map(|credit| format!("{}: {}", credit.role, credit.name)),
        );
        lines.push(self.copyright.to_string());
        lines.push(self.publisher_link.to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let about = AboutInfo::current();
        let lines = about.lines();

        assert_eq!(lines[0], "MyConsole");
        assert_eq!(lines[1], format!("Version: {}", env!("CARGO_PKG_VERSION")));
        assert!(lines.contains(&"Publisher: Renowned Games".to_string()));
        assert_eq!(lines.len(), 2 + about.credits.len() + 2);
    }
}
