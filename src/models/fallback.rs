/// Canned replies used when the service answers with an error.
///
/// Rules are checked in order; the first rule with a matching keyword wins.
const FALLBACK_RULES: &[(&[&str], &str)] = &[
    (
        &["visa"],
        "New Zealand and Australia offer various visa types including work visas, student visas, \
         and permanent resident visas. Which specific visa would you like to learn more about?",
    ),
    (
        &["point", "score"],
        "The skilled migration points system considers multiple factors including age, educational \
         background, work experience, and language ability. The point requirements vary by visa \
         category, typically New Zealand skilled migration requires 160+ points, while Australian \
         skilled migration requires 65-75+ points to be invited to apply.",
    ),
    (
        &["cost", "fee"],
        "Immigration costs include application fees, medical examination fees, translation fees, \
         etc. The main applicant fee for Australian skilled migration is approximately 4000 AUD, \
         and New Zealand skilled migration is about 3000 NZD. Consider also agent fees (if used) \
         and initial settlement costs.",
    ),
];

/// Deterministic offline reply for `last_user_message`
///
/// Case-insensitive substring match against [`FALLBACK_RULES`]; anything
/// unmatched gets a generic reply quoting the question.
pub fn local_fallback(last_user_message: &str) -> String {
    let lowered = last_user_message.to_lowercase();

    FALLBACK_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, reply)| reply.to_string())
        .unwrap_or_else(|| {
            format!(
                "Thank you for your inquiry. As ImmiGo immigration consultant, I can provide \
                 professional guidance on New Zealand and Australia immigration policies. Which \
                 specific aspects of \"{}\" would you like to learn more about? (Note: This is a \
                 backup mode response, API connection failed)",
                last_user_message
            )
        })
}
