//! Family member display formatting

use crate::models::Member;

/// Format the member list
pub fn format_member_list(members: &[Member]) -> String {
    if members.is_empty() {
        return "No family members found.".to_string();
    }

    let mut output = String::new();
    for member in members {
        let admin = if member.is_admin() { " [admin]" } else { "" };
        output.push_str(&format!(
            "  {:<20} {:<30} {}{}\n",
            member.name, member.email, member.id, admin
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberRole;

    #[test]
    fn test_member_list() {
        assert_eq!(format_member_list(&[]), "No family members found.");

        let mut admin = Member::new("Alice", "alice@example.com");
        admin.role = MemberRole::Admin;
        let text = format_member_list(&[admin, Member::new("Bob", "bob@example.com")]);
        assert!(text.contains("Alice"));
        assert!(text.contains("bob@example.com"));
        assert_eq!(text.matches("[admin]").count(), 1);
    }
}
