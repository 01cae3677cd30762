// Prompt templates for skill extraction and candidate feedback.

/// Skill extraction prompt. Replace `{jd_text}` before sending.
pub const SKILL_EXTRACTION_PROMPT: &str = r#"Extract a list of the most important skills from this job description.

Return a JSON object with this EXACT schema:
{"skills": ["Python", "SQL", "Stakeholder management"]}

Rules:
- Use the skill names as written in the job description.
- Include hard skills (languages, tools, platforms) and essential soft skills.
- Do NOT invent skills that the job description does not ask for.

Job Description:
{jd_text}
"#;

/// Feedback prompt. Replace `{jd_text}`, `{found_skills}` and `{missing_skills}`.
pub const FEEDBACK_PROMPT: &str = r#"Your task is to provide concise, actionable feedback for a candidate.

Analyze the following Job Description and the key skills found in the candidate's resume.
The candidate is missing these specific skills: {missing_skills}.

Provide 3 constructive, numbered bullet points of advice for the candidate.
Focus on how they can better align their resume with this type of job role.
Keep the tone encouraging and professional.

JOB DESCRIPTION:
---
{jd_text}
---

CANDIDATE'S MATCHED SKILLS:
---
{found_skills}
---
"#;
