use reltime::{ParseResultVerbose, Step, format_timestamp};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, res: &ParseResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Resolving: \"{}\"", input), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Steps ━━━", ansi::GRAY));
    for step in &res.details.steps {
        println!("  {}", fmt_step(step, &palette));
    }

    if res.details.matched.is_empty() {
        println!("\n{}", palette.paint("No relative phrase recognized; the anchor is returned as-is.", ansi::YELLOW));
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    println!("  {}", palette.bold(palette.paint(&res.formatted, ansi::GREEN)));

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Total: {}", palette.paint(format!("{:?}", res.details.total), ansi::GREEN));
    println!();
}

fn fmt_step(step: &Step, palette: &ansi::Palette) -> String {
    let name = palette.paint(format!("{:<9}", step.component.config_name()), ansi::BLUE);
    match &step.literal {
        Some(literal) => format!(
            "{} {} {} {} {}",
            name,
            palette.paint(format!("\"{literal}\""), ansi::CYAN),
            palette.paint(format!("{:+}", step.delta), ansi::YELLOW),
            palette.dim("→"),
            format_timestamp(step.anchor),
        ),
        None => format!("{} {}", name, palette.dim("✗ no match")),
    }
}
