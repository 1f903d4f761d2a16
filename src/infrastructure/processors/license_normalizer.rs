use once_cell::sync::Lazy;
use regex::Regex;

/// Recognized boilerplate header: an `@license` marker, a copyright line
/// naming one of the two permitted rights-holders, an optional
/// "All rights reserved." line and an SPDX identifier, as one contiguous
/// comment block. Anything that deviates from this structure is not a match.
static LICENSE_HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"/\*\*?\n",
        r" \* @license\n",
        r" \* Copyright \d{4} (?:Google LLC|Massachusetts Institute of Technology)\n",
        r"(?: \* All rights reserved\.\n)?",
        r" \* SPDX-License-Identifier: Apache-2\.0\n",
        r" \*/",
    ))
    .unwrap()
});

/// Strips recognized license headers without changing the file's line count.
///
/// Debug maps are computed downstream against the normalized text, so every
/// removed block is replaced by exactly the number of line breaks it
/// spanned. Near-matches are left untouched; that is a non-match, not an
/// error.
pub struct LicenseNormalizer;

impl LicenseNormalizer {
    pub fn normalize(text: &str) -> String {
        LICENSE_HEADER_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                "\n".repeat(caps[0].matches('\n').count())
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_count(text: &str) -> usize {
        text.split('\n').count()
    }

    const GOOGLE_HEADER: &str = "/**\n \
         * @license\n \
         * Copyright 2021 Google LLC\n \
         * SPDX-License-Identifier: Apache-2.0\n \
         */";

    const MIT_HEADER: &str = "/**\n \
         * @license\n \
         * Copyright 2012 Massachusetts Institute of Technology\n \
         * All rights reserved.\n \
         * SPDX-License-Identifier: Apache-2.0\n \
         */";

    #[test]
    fn test_strips_google_header() {
        let input = format!("{}\n'use strict';\nconsole.log(1);\n", GOOGLE_HEADER);
        let output = LicenseNormalizer::normalize(&input);

        assert!(!output.contains("@license"));
        assert!(!output.contains("Google LLC"));
        assert!(output.contains("'use strict';"));
        assert_eq!(line_count(&input), line_count(&output));
    }

    #[test]
    fn test_strips_header_with_all_rights_reserved() {
        let input = format!("{}\nvar x = 1;\n", MIT_HEADER);
        let output = LicenseNormalizer::normalize(&input);

        assert!(!output.contains("Massachusetts"));
        assert!(!output.contains("All rights reserved"));
        assert_eq!(line_count(&input), line_count(&output));
    }

    #[test]
    fn test_multiple_matches_preserve_line_count() {
        let input = format!("{}\nfirst();\n{}\nsecond();\n", GOOGLE_HEADER, MIT_HEADER);
        let output = LicenseNormalizer::normalize(&input);

        assert!(!output.contains("@license"));
        assert!(output.contains("first();"));
        assert!(output.contains("second();"));
        assert_eq!(line_count(&input), line_count(&output));
    }

    #[test]
    fn test_zero_matches_is_identity() {
        let input = "// plain file\nconsole.log('no header');\n";
        assert_eq!(LicenseNormalizer::normalize(input), input);
    }

    #[test]
    fn test_unrecognized_holder_left_untouched() {
        let input = "/**\n \
             * @license\n \
             * Copyright 2021 Example Corp\n \
             * SPDX-License-Identifier: Apache-2.0\n \
             */\ncode();\n";
        assert_eq!(LicenseNormalizer::normalize(input), input);
    }

    #[test]
    fn test_near_match_missing_spdx_left_untouched() {
        let input = "/**\n \
             * @license\n \
             * Copyright 2021 Google LLC\n \
             */\ncode();\n";
        assert_eq!(LicenseNormalizer::normalize(input), input);
    }

    #[test]
    fn test_replacement_is_only_line_breaks() {
        let input = format!("{}\n", GOOGLE_HEADER);
        let output = LicenseNormalizer::normalize(&input);
        assert!(output.chars().all(|c| c == '\n'));
    }
}
