//! Fixed protocol constants shared by every deployment.

/// Countdown length of the brainstorming window.
pub const BRAINSTORM_DURATION_SECS: u64 = 600;

/// Countdown length of the pre-test and post-test writing windows.
pub const WRITING_TEST_DURATION_SECS: u64 = 1800;

/// Longest text a single workbook cell can hold, in characters. Every
/// participant-entered string is capped here so a finished session always
/// exports.
pub const MAX_TEXT_CHARS: usize = 32_767;

/// Model reformulation revealed to the participant after the pre-test.
pub const MODEL_TEXT: &str = "Model Reformulation:

Many young people in the United States actively participate in volunteer work, \
often joining local community programs or school-based activities.
In contrast, Japanese youth tend to have fewer opportunities to engage in volunteering, \
which may be due to differences in cultural expectations, educational systems, \
and the availability of volunteer organizations.
This suggests that social and institutional factors play a major role in shaping \
how young people in different countries contribute to their communities.";
