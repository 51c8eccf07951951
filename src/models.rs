use std::fmt;

use rust_decimal::Decimal;

/// Seat a bid line is bid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    Fmp,
    AnyFa,
}

impl Position {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fmp => "FMP",
            Self::AnyFa => "Any FA",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification parsed from a row's category marker, e.g. `purser intl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub position: Position,
    pub international: bool,
}

impl Category {
    pub fn parse(marker: &str) -> std::result::Result<Self, String> {
        let lowered = marker.trim().to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '/' | ',' | '+'))
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return Err("category marker is empty".to_string());
        }

        let mut position = None;
        let mut international = false;
        for (i, token) in tokens.iter().enumerate() {
            let role = match *token {
                "purser" | "fmp" => Some(Position::Fmp),
                "general" | "fa" => Some(Position::AnyFa),
                "any" if tokens.get(i + 1) == Some(&"fa") => None,
                "international" | "intl" | "int" => {
                    international = true;
                    None
                }
                other => return Err(format!("unknown category token '{other}' in '{marker}'")),
            };
            if let Some(role) = role {
                if position.is_some_and(|p| p != role) {
                    return Err(format!("conflicting roles in '{marker}'"));
                }
                position = Some(role);
            }
        }

        match position {
            Some(position) => Ok(Self {
                position,
                international,
            }),
            None => Err(format!("no purser or general role in '{marker}'")),
        }
    }
}

/// One data row as read from the source table, before any pay is computed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based row in the source; the header is row 1.
    pub row: usize,
    pub line_number: i64,
    pub credit: Decimal,
    pub tafb: Decimal,
    pub crew: i64,
    pub category: String,
}

/// A priced bid line. Only the calculator builds these.
#[derive(Debug, Clone, PartialEq)]
pub struct BidLine {
    line_number: i64,
    credit: Decimal,
    tafb: Decimal,
    crew: i64,
    position: Position,
    international: bool,
    pay_credit: Decimal,
    per_diem: Decimal,
    pay_total: Decimal,
}

impl BidLine {
    /// Returns `None` when `pay_credit + per_diem` does not fit in a `Decimal`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        line_number: i64,
        credit: Decimal,
        tafb: Decimal,
        crew: i64,
        position: Position,
        international: bool,
        pay_credit: Decimal,
        per_diem: Decimal,
    ) -> Option<Self> {
        let pay_total = pay_credit.checked_add(per_diem)?;
        Some(Self {
            line_number,
            credit,
            tafb,
            crew,
            position,
            international,
            pay_credit,
            per_diem,
            pay_total,
        })
    }

    pub fn line_number(&self) -> i64 {
        self.line_number
    }

    pub fn credit(&self) -> Decimal {
        self.credit
    }

    pub fn tafb(&self) -> Decimal {
        self.tafb
    }

    pub fn crew(&self) -> i64 {
        self.crew
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn international(&self) -> bool {
        self.international
    }

    pub fn pay_credit(&self) -> Decimal {
        self.pay_credit
    }

    pub fn per_diem(&self) -> Decimal {
        self.per_diem
    }

    pub fn pay_total(&self) -> Decimal {
        self.pay_total
    }
}
