// Prompts for the analysis interpreters. The scoring user message layout is
// load-bearing: the local fallback splits it back apart on the
// `JOB DESCRIPTION:` / `RESUME TEXT:` markers.

pub const CATEGORIZE_SYSTEM: &str = "You are an expert recruitment data analyst. \
    Analyze the following job description and extract the key requirements. \
    Your entire response must be ONLY a single valid JSON object with the following keys: \
    \"technical_skills\", \"soft_skills\", \"experience_years\", \"education\", \"certifications\". \
    Each key's value must be an array of strings. \
    For \"experience_years\", provide one string like [\"3+ years\"]. \
    If a category has no requirements, provide an empty array.";

pub const SCORE_SYSTEM: &str = "You are an advanced Applicant Tracking System (ATS). \
    Your task is to analyze the provided resume against the job description and return \
    a detailed analysis as a single, valid JSON object. The JSON object must have three keys: \
    \"score\" (a number from 0 to 100 representing the match percentage), \
    \"strengths\" (an array of 2-3 strings highlighting what the resume does well), and \
    \"weaknesses\" (an array of 2-3 strings suggesting areas for improvement).";

pub const COACH_SYSTEM: &str = "You are an expert resume coach.";

pub fn categorize_user_message(job_description: &str) -> String {
    format!("Job Description: {job_description}")
}

pub fn scoring_user_message(job_desc: &str, resume: &str) -> String {
    format!("JOB DESCRIPTION:\n{job_desc}\n\nRESUME TEXT:\n{resume}")
}

pub fn interview_questions_user_message(job_desc: &str, resume: &str) -> String {
    format!(
        "Generate 5 likely interview questions based on this job and resume.\n\nJOB:\n{job_desc}\n\nRESUME:\n{resume}"
    )
}

pub fn suggestions_user_message(job_desc: &str, resume: &str, missing_keywords: &[String]) -> String {
    format!(
        "Rewrite this resume to better match the job description, incorporating missing keywords: \"{}\".\n\nJOB:\n{job_desc}\n\nRESUME:\n{resume}",
        missing_keywords.join(", ")
    )
}
