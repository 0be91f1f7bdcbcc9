// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against command-line interfaces that aren't big enough to go in their
//! own modules.

use std::str::FromStr;

use super::*;

#[test]
fn test_arg_file_types() {
    assert!(matches!(ArgFileTypes::from_str("toml"), Ok(ArgFileTypes::Toml)));
    assert!(matches!(ArgFileTypes::from_str("yml"), Ok(ArgFileTypes::Yaml)));
    assert!(matches!(ArgFileTypes::from_str("yaml"), Ok(ArgFileTypes::Yaml)));
    assert!(ArgFileTypes::from_str("ini").is_err());
    assert_eq!(ARG_FILE_TYPES_COMMA_SEPARATED.as_str(), "toml, json, yaml");
}

#[test]
fn test_help_texts_list_choices() {
    assert!(POLICY_HELP.contains("all, any"), "{}", *POLICY_HELP);
    assert!(POLICY_HELP.ends_with("Default: all"));
    assert!(
        AIRMASS_MODEL_HELP.contains("secant, kasten-young"),
        "{}",
        *AIRMASS_MODEL_HELP
    );
    assert!(TIME_RES_HELP.contains("s, min, h"), "{}", *TIME_RES_HELP);
    assert!(MAX_AIRMASS_HELP.ends_with("Default: 2.5"));
}
