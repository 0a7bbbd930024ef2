//! Fixed instruction strings and the static profile document.
//!
//! These are prompt-level contracts, not code-level ones: the word cap in
//! the persona instruction is a request to the model, nothing enforces it.

use indoc::indoc;

pub const PROFILE: &str = indoc! {r#"
    ALEX MOREAU
    alex.moreau.dev@gmail.com | Lyon, France | github.com/amoreau-dev

    EDUCATION
    INSA Lyon  Jun 2024
    Master's, Computer Science

    SKILLS
    Languages: Rust, Python, SQL, TypeScript
    Technologies & Tools: REST APIs, Git, Docker, Kubernetes, PostgreSQL, Kafka, CI/CD
    Frameworks: Axum, Actix, FastAPI, React
    Certifications: AWS Solutions Architect Associate, CKA (Certified Kubernetes Administrator)

    TECHNICAL PROJECTS
    Ledgerline - Event-Sourced Accounting Engine
    - Built an append-only double-entry ledger in Rust handling 40k writes/s on a single
      node, with exactly-once projection rebuilds from Kafka
    - Won 'Best Infrastructure Hack' at DotRS 2023 (300+ participants)

    Corridor - Transit Routing API
    - Designed a contraction-hierarchies router over the GTFS feeds of 12 French cities,
      answering multi-modal queries in under 15 ms at p99
    - Served 20k monthly users through a public Axum API with per-key quotas

    Sherpa - RAG Documentation Assistant
    - Shipped a retrieval-augmented chatbot over 8k pages of internal docs using OpenAI
      embeddings and pgvector, cutting support ticket volume by a third

    PROFESSIONAL EXPERIENCE
    Datalith  Remote
    Backend Engineer  Mar 2023 - present
    - Own the ingestion pipeline (Rust, Kafka, ClickHouse) processing 2 TB/day; reduced
      end-to-end latency from 40 s to 6 s
    - Introduced contract testing across 14 internal services, cutting integration
      regressions by half

    Nexa Cloud  Lyon, France
    Software Engineering Intern  May 2022 - Sep 2022
    - Built a self-service PostgreSQL provisioning portal (Python, Terraform) used by
      200+ internal developers

    AWARDS
    - Best Infrastructure Hack, DotRS 2023
    - Dean's List, INSA Lyon, 2021-2023

    CONTACT
    mailto:alex.moreau.dev@gmail.com
    https://github.com/amoreau-dev
"#};

/// Persona instruction for the answer stage; the profile is concatenated in
/// so the model never needs retrieval.
pub fn answer_system_prompt() -> String {
    let instruction = indoc! {r#"
        You are Alex Moreau's AI career agent. Be confident, specific, and professional.
        Use concrete examples and quantified impact from the profile. Connect skills to
        role needs. Keep answers to 250 words or less. If asked about anything unrelated
        to Alex's profile, politely decline and point the caller back to questions about
        skills, certifications, projects, or experience.

        Profile:
    "#};

    format!("{instruction}{PROFILE}")
}

/// Instruction for the classification pre-step. The verdict parser only
/// looks at the first word, so the prompt pins the output format hard.
pub const CLASSIFIER_SYSTEM_PROMPT: &str = indoc! {r#"
    You are a strict binary classifier. Decide whether the user's question is about
    Alex Moreau's skills, certifications, projects, professional experience, education,
    awards, or contact information. Respond with exactly one word: RELATED if it is,
    UNRELATED if it is not. Do not explain your answer.
"#};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_prompt_embeds_the_profile() {
        let prompt = answer_system_prompt();

        assert!(prompt.starts_with("You are Alex Moreau's AI career agent."));
        assert!(prompt.contains("ALEX MOREAU"));
        assert!(prompt.contains("Certifications"));
    }

    #[test]
    fn classifier_prompt_pins_the_output_vocabulary() {
        assert!(CLASSIFIER_SYSTEM_PROMPT.contains("RELATED"));
        assert!(CLASSIFIER_SYSTEM_PROMPT.contains("UNRELATED"));
        assert!(CLASSIFIER_SYSTEM_PROMPT.contains("exactly one word"));
    }
}
