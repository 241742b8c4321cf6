// core/src/render.rs
//! Tekst til chat-svaret. Strengene er på russisk, som resten av arket.

use crate::numeric::fmt_number;
use crate::weight::WeightStats;
use crate::workout::{ExerciseRecord, WorkoutSession};

pub const PLACEHOLDER: &str = "—";
pub const DEFAULT_EXTRA_NOTE: &str = "по 5 повторений";

fn push_exercise(lines: &mut Vec<String>, n: usize, ex: &ExerciseRecord) {
    lines.push(format!("**{}. {}**", n, ex.name));

    if let Some(pb) = &ex.prior_best {
        lines.push(format!(
            "  └ Пред. лучший сет: {} кг × {} повт., RPE {}",
            pb.weight,
            pb.reps.as_deref().unwrap_or(""),
            pb.rpe.as_deref().unwrap_or("")
        ));
    }

    if !ex.warmups.is_empty() {
        lines.push(format!("  └ Разминка: {}", ex.warmups.join(", ")));
    }

    if let Some(w) = &ex.working_weight {
        lines.push(format!("  └ Рабочий вес: {} кг", w));
    }

    if let Some(r) = &ex.working_reps {
        lines.push(format!("  └ Повторы: {}", r));
    }

    if let Some(extra) = &ex.extra_sets {
        lines.push(format!(
            "  └ Добивочных подходов: {} × {}",
            extra.count,
            extra.note.as_deref().unwrap_or(DEFAULT_EXTRA_NOTE)
        ));
    }

    lines.push(String::new());
}

/// Økten som lesbar tekst.
pub fn format_workout(session: &WorkoutSession) -> String {
    let mut lines = vec!["💪 **Тренировка (без даты)**".to_string(), String::new()];

    for (i, ex) in session.exercises.iter().enumerate() {
        push_exercise(&mut lines, i + 1, ex);
    }

    if !session.comment.is_empty() {
        lines.push(format!("📝 Комментарий: {}", session.comment));
    }

    lines.join("\n")
}

fn kg_or_placeholder(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{} кг", fmt_number(x)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Månedsoppsummering. Én linje per fakta; manglende verdi → "—".
pub fn format_weight_summary(stats: &WeightStats) -> String {
    [
        "⚖️ Вес — текущий месяц:".to_string(),
        format!("- Минимум: {}", kg_or_placeholder(stats.min)),
        format!("- Максимум: {}", kg_or_placeholder(stats.max)),
        format!(
            "- Вес на сегодня внесён: {}",
            if stats.today_filled { "да" } else { "нет" }
        ),
        format!("- Среднее за последние 7 дней: {}", kg_or_placeholder(stats.avg_last_7)),
        format!("- Заполнено дней (до сегодня): {}", stats.filled_days),
        format!("- Пропусков (до сегодня): {}", stats.missing_days),
    ]
    .join("\n")
}
