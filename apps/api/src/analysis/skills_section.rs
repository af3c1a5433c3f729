pub const NO_SKILLS: &str = "Your CV doesn't clearly highlight any skills. Add a dedicated skills section with both technical and soft skills relevant to your target positions.";
pub const LIMITED_SKILLS: &str = "Your skills section appears limited. Consider expanding it to showcase a broader range of both technical and soft skills.";
pub const ORGANIZE_SKILLS: &str = "While you have a good number of skills listed, consider organizing them into categories (e.g., Technical, Soft Skills, Industry Knowledge) and prioritizing the most relevant ones for your target positions.";
pub const REASONABLE_SKILLS: &str = "Your skills section looks reasonable, but consider adding proficiency levels and ensure the skills are relevant to your target roles.";

/// One message per skill-count band: 0, 1–4, 5–9, 10+.
pub fn skills_suggestion(skill_count: usize) -> &'static str {
    match skill_count {
        0 => NO_SKILLS,
        1..=4 => LIMITED_SKILLS,
        5..=9 => REASONABLE_SKILLS,
        _ => ORGANIZE_SKILLS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        assert_eq!(skills_suggestion(0), NO_SKILLS);
        for n in 1..=4 {
            assert_eq!(skills_suggestion(n), LIMITED_SKILLS, "count {n}");
        }
        for n in 5..=9 {
            assert_eq!(skills_suggestion(n), REASONABLE_SKILLS, "count {n}");
        }
        for n in [10, 11, 50, usize::MAX] {
            assert_eq!(skills_suggestion(n), ORGANIZE_SKILLS, "count {n}");
        }
    }
}
