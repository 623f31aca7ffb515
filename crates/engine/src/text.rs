//! Text synthesizer — role- and outcome-aware notification messages.
//!
//! Pure, total, deterministic. Missing identity (an empty course name, or an
//! empty counterpart name where the message embeds it) degrades to the empty
//! string rather than a malformed message; the caller decides whether empty
//! text is still delivered.

use herald_common::types::CourseAction;

/// Synthesize the message for one recipient of a course action.
///
/// - `recipient_is_student`: whether the recipient being addressed is the
///   student of the event (the professor otherwise)
/// - `counterpart_name`: display name of the other party
/// - `outcome_accepted`: approval flag, ignored by actions that don't
///   request approval
pub fn synthesize(
    action: CourseAction,
    _course_id: &str,
    course_name: &str,
    recipient_is_student: bool,
    counterpart_name: &str,
    outcome_accepted: bool,
) -> String {
    if course_name.is_empty() {
        return String::new();
    }

    match action {
        CourseAction::Register => {
            if recipient_is_student {
                if outcome_accepted {
                    format!("You have been registered in a new course: \"{course_name}\"")
                } else {
                    format!(
                        "Your registration request in course: \"{course_name}\" has been rejected"
                    )
                }
            } else if counterpart_name.is_empty() {
                String::new()
            } else {
                // Outcome is ignored for the professor: they see the
                // registration either way.
                format!(
                    "Student {counterpart_name} has been registered in your course: \"{course_name}\""
                )
            }
        }
        CourseAction::Unregister => {
            if recipient_is_student {
                format!("You have been unregistered in course: \"{course_name}\"")
            } else if counterpart_name.is_empty() {
                String::new()
            } else {
                format!(
                    "Student {counterpart_name} has been unregistered in your course: \"{course_name}\""
                )
            }
        }
        CourseAction::SeeDetailsStudent => {
            // Self-initiated request: no self-notification for the student.
            if recipient_is_student || counterpart_name.is_empty() {
                String::new()
            } else {
                format!(
                    "Student {counterpart_name} has request access to details for your course: \"{course_name}\""
                )
            }
        }
        CourseAction::SeeDetailsProfessor => {
            // Only the student is notified of the professor's decision.
            if !recipient_is_student {
                String::new()
            } else if outcome_accepted {
                format!("You have been granted access to details for course: \"{course_name}\"")
            } else {
                format!("Your access request in course \"{course_name}\" has been rejected")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_student_accepted() {
        assert_eq!(
            synthesize(CourseAction::Register, "c1", "math", true, "Noah", true),
            "You have been registered in a new course: \"math\""
        );
    }

    #[test]
    fn test_register_student_rejected() {
        assert_eq!(
            synthesize(CourseAction::Register, "c1", "math", true, "Noah", false),
            "Your registration request in course: \"math\" has been rejected"
        );
    }

    #[test]
    fn test_register_professor_ignores_outcome() {
        let accepted = synthesize(CourseAction::Register, "c1", "math", false, "Noah", true);
        let rejected = synthesize(CourseAction::Register, "c1", "math", false, "Noah", false);
        assert_eq!(
            accepted,
            "Student Noah has been registered in your course: \"math\""
        );
        assert_eq!(accepted, rejected);
    }

    #[test]
    fn test_unregister_student() {
        assert_eq!(
            synthesize(CourseAction::Unregister, "c1", "math", true, "Noah", true),
            "You have been unregistered in course: \"math\""
        );
    }

    #[test]
    fn test_unregister_professor() {
        assert_eq!(
            synthesize(CourseAction::Unregister, "c1", "math", false, "Noah", true),
            "Student Noah has been unregistered in your course: \"math\""
        );
    }

    #[test]
    fn test_see_details_student_notifies_professor_only() {
        assert_eq!(
            synthesize(CourseAction::SeeDetailsStudent, "c1", "math", false, "Noah", true),
            "Student Noah has request access to details for your course: \"math\""
        );
        // Never a self-notification for the requesting student.
        assert_eq!(
            synthesize(CourseAction::SeeDetailsStudent, "c1", "math", true, "Arrow", true),
            ""
        );
    }

    #[test]
    fn test_see_details_professor_notifies_student_only() {
        assert_eq!(
            synthesize(CourseAction::SeeDetailsProfessor, "c1", "math", true, "Arrow", true),
            "You have been granted access to details for course: \"math\""
        );
        assert_eq!(
            synthesize(CourseAction::SeeDetailsProfessor, "c1", "math", true, "Arrow", false),
            "Your access request in course \"math\" has been rejected"
        );
        assert_eq!(
            synthesize(CourseAction::SeeDetailsProfessor, "c1", "math", false, "Noah", true),
            ""
        );
    }

    #[test]
    fn test_missing_identity_degrades_to_empty() {
        // Empty course name
        assert_eq!(
            synthesize(CourseAction::Register, "c1", "", true, "Noah", true),
            ""
        );
        // Empty counterpart where the message embeds it
        assert_eq!(
            synthesize(CourseAction::Register, "c1", "math", false, "", true),
            ""
        );
        assert_eq!(
            synthesize(CourseAction::SeeDetailsStudent, "", "", true, "", false),
            ""
        );
    }

    #[test]
    fn test_symmetric_actions_non_empty_for_both_roles() {
        for action in [CourseAction::Register, CourseAction::Unregister] {
            for is_student in [true, false] {
                let text = synthesize(action, "c1", "math", is_student, "Noah", true);
                assert!(!text.is_empty(), "{action} should notify both roles");
            }
        }
    }
}
