//! Console reporter with colored output

use crate::analyzer::scoring::ScoreCalculator;
use crate::summary::{AggregateStats, Highlight};
use crate::{Analysis, Grade, WeightClass, MAX_SUB_SCORE};
use colored::Colorize;

/// Entries shown from each top list in the summary
const SUMMARY_LIST_LEN: usize = 5;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analysis
    pub fn report(&self, analysis: &Analysis) {
        self.print_header(analysis);
        self.print_score(analysis);
        self.print_breakdown(analysis);
        if self.verbose {
            self.print_stages(analysis);
        }
        self.print_recommendations(analysis);
        println!();
    }

    /// Report multiple analyses with summary
    pub fn report_many(&self, results: &[Analysis], stats: &AggregateStats) {
        for analysis in results {
            self.report(analysis);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, analysis: &Analysis) {
        println!("{}", self.quiet_line(analysis));
    }

    /// One line per speech: file, speaker, party, score and grade
    pub fn quiet_line(&self, analysis: &Analysis) -> String {
        format!(
            "{}: {} ({}) {} ({})",
            analysis.file_name,
            analysis.speaker,
            analysis.party,
            analysis.total_score,
            self.colorize_grade(&analysis.grade)
        )
    }

    fn print_header(&self, analysis: &Analysis) {
        println!();
        println!(
            "{}",
            format!("📊 Talanalys: {}", analysis.file_name).bold()
        );
        println!(
            "   Talare: {} | Parti: {} | Ord: {}",
            analysis.speaker, analysis.party, analysis.word_count
        );
        let mut meta = format!("   Datum: {}", analysis.date.format("%Y-%m-%d %H:%M"));
        if let Some(ref source) = analysis.source {
            meta.push_str(&format!(" | Källa: {}", source));
        }
        println!("{}", meta.dimmed());
        println!();
    }

    fn print_score(&self, analysis: &Analysis) {
        let grade_str = self.colorize_grade(&analysis.grade);
        let score_bar = self.create_score_bar(analysis.total_score);

        println!("   Totalpoäng: {} {}", score_bar, grade_str.bold());
        println!(
            "   {}",
            ScoreCalculator::grade_description(analysis.grade).dimmed()
        );
        println!();
    }

    fn print_breakdown(&self, analysis: &Analysis) {
        for class in [WeightClass::High, WeightClass::Normal, WeightClass::Low] {
            println!(
                "   {} {}",
                Self::class_title(class).bold(),
                format!("(×{})", class.multiplier()).dimmed()
            );
            for (metric, score) in analysis
                .scores
                .entries()
                .filter(|(m, _)| m.weight_class() == class)
            {
                let bar = self.create_mini_bar(score, MAX_SUB_SCORE);
                let score_str = format!("{:>2}/{}", score, MAX_SUB_SCORE);
                let colored_score = if score >= 35 {
                    score_str.green()
                } else if score >= 20 {
                    score_str.yellow()
                } else {
                    score_str.red()
                };
                println!("   {} {} {}", bar, colored_score, metric.label());
            }
        }
        println!();
    }

    fn print_stages(&self, analysis: &Analysis) {
        let stages = ScoreCalculator::stages(&analysis.scores);
        println!("   {}", "Beräkning:".bold());
        println!(
            "   {} viktad summa {:.1} → normaliserad {:.1} → logistisk {:.1} → komprimerad {:.1} → {}",
            "↳".dimmed(),
            stages.weighted,
            stages.normalized,
            stages.logistic,
            stages.compressed,
            stages.total.to_string().bold()
        );
        println!();
    }

    fn print_recommendations(&self, analysis: &Analysis) {
        if analysis.total_score >= 80 {
            return;
        }
        let recs = ScoreCalculator::recommendations(&analysis.scores);
        println!("   {}", "Rekommendationer:".bold());
        for rec in recs.iter().take(3) {
            println!("   {} {}", "→".cyan(), rec);
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Sammanfattning".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Analyserade tal: {}",
            stats.files_analyzed.to_string().bold()
        );
        println!(
            "   Medelpoäng:      {} ({})",
            stats.average_score.value.to_string().bold(),
            self.colorize_grade(&stats.average_score.grade)
        );
        println!("   Antal ord:       {}", stats.total_words);

        if !stats.parties.is_empty() {
            println!();
            println!("   {}", "Partier:".bold());
            for p in &stats.parties {
                println!(
                    "   {:<4} {:>3} ({} tal, högst {}, lägst {})",
                    p.party, p.average, p.count, p.highest, p.lowest
                );
            }
        }

        if !stats.speakers.is_empty() {
            println!();
            println!("   {}", "Talare:".bold());
            for s in stats.speakers.iter().take(SUMMARY_LIST_LEN) {
                println!(
                    "   {:>3}  {} ({}), {} tal",
                    s.average, s.speaker, s.party, s.count
                );
            }
        }

        self.print_list("Högst poäng:", &stats.top);
        self.print_list("Lägst poäng:", &stats.bottom);

        println!();
        self.print_highlight("Längst tal", stats.longest.as_ref(), "ord");
        self.print_highlight("Kortast tal", stats.shortest.as_ref(), "ord");
        self.print_highlight("Mest komplext", stats.most_complex.as_ref(), "LIX");
        self.print_highlight("Mest varierat", stats.most_varied.as_ref(), "OVIX");
        println!();
    }

    fn print_list(&self, title: &str, entries: &[Highlight]) {
        if entries.is_empty() {
            return;
        }
        println!();
        println!("   {}", title.bold());
        for (i, h) in entries.iter().take(SUMMARY_LIST_LEN).enumerate() {
            println!(
                "   {:>2}. {:>3}  {} ({}) {}",
                i + 1,
                h.total_score,
                h.speaker,
                h.party,
                h.file_name.dimmed()
            );
        }
    }

    fn print_highlight(&self, title: &str, highlight: Option<&Highlight>, unit: &str) {
        if let Some(h) = highlight {
            println!(
                "   {:<14} {} ({}), {} {}",
                format!("{}:", title),
                h.speaker,
                h.party,
                h.value,
                unit
            );
        }
    }

    fn class_title(class: WeightClass) -> &'static str {
        match class {
            WeightClass::High => "Hög vikt:",
            WeightClass::Normal => "Normal vikt:",
            WeightClass::Low => "Låg vikt:",
        }
    }

    fn colorize_grade(&self, grade: &Grade) -> colored::ColoredString {
        let s = grade.to_string();
        if !self.use_colors {
            return s.normal();
        }
        match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.yellow(),
            Grade::E => s.red(),
            Grade::F => s.red().bold(),
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score.min(100) as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>3}", "█".repeat(filled), "░".repeat(empty), score);

        if self.use_colors {
            if score >= 70 {
                bar.green().to_string()
            } else if score >= 50 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, score: u8, max: u8) -> String {
        let filled = (score.min(max) as usize * 10) / max as usize;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScoreBreakdown;
    use chrono::Utc;

    fn make_analysis(total: u8) -> Analysis {
        Analysis {
            id: "analysis-1-abc".to_string(),
            file_name: "Anna_Andersson.txt".to_string(),
            speaker: "Anna Andersson".to_string(),
            party: "S".to_string(),
            date: Utc::now(),
            word_count: 120,
            scores: ScoreBreakdown::uniform(25),
            total_score: total,
            grade: Grade::from_score(total),
            source: Some("upload".to_string()),
        }
    }

    #[test]
    fn test_quiet_line_without_colors() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(
            reporter.quiet_line(&make_analysis(72)),
            "Anna_Andersson.txt: Anna Andersson (S) 72 (B)"
        );
    }

    #[test]
    fn test_score_bar_fill() {
        let reporter = ConsoleReporter::new().without_colors();
        let bar = reporter.create_score_bar(50);
        assert_eq!(bar.matches('█').count(), 10);
        assert_eq!(bar.matches('░').count(), 10);
        assert!(bar.ends_with(" 50"));
    }

    #[test]
    fn test_mini_bar_bounds() {
        let reporter = ConsoleReporter::new();
        assert_eq!(reporter.create_mini_bar(50, 50), format!("[{}]", "▓".repeat(10)));
        assert_eq!(reporter.create_mini_bar(1, 50), format!("[{}]", "░".repeat(10)));
    }

    #[test]
    fn test_report_does_not_panic() {
        let reporter = ConsoleReporter::new().without_colors().verbose();
        let results = vec![make_analysis(72), make_analysis(40)];
        let stats = AggregateStats::from_analyses(&results);
        reporter.report_many(&results, &stats);
        reporter.report_quiet(&results[0]);
    }
}
