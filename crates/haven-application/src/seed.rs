//! Demo data loaded into the stores at startup and on reset.

use haven_core::supporter::{Profession, Supporter};
use haven_core::user::{Account, Role};

pub const DEMO_SURVIVOR_ID: &str = "u_demo_survivor";
pub const DEMO_SUPPORTER_ID: &str = "u_demo_supporter";

/// Accounts present before anyone registers.
pub fn demo_accounts() -> Vec<Account> {
    vec![
        Account {
            id: DEMO_SURVIVOR_ID.to_string(),
            name: "Alex Doe".to_string(),
            email: "survivor@demo.com".to_string(),
            secret: "password".to_string(),
            role: Role::Survivor,
            alias: Some("User_7392".to_string()),
            profession: None,
        },
        Account {
            id: DEMO_SUPPORTER_ID.to_string(),
            name: "Dr. Sarah Smith".to_string(),
            email: "sarah@clinic.com".to_string(),
            secret: "password".to_string(),
            role: Role::Supporter,
            alias: None,
            profession: Some(Profession::Therapist),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn supporter(
    id: &str,
    name: &str,
    profession: Profession,
    specializations: &[&str],
    rating: f32,
    reviews: u32,
    response_time: &str,
    bio: &str,
) -> Supporter {
    Supporter {
        id: id.to_string(),
        name: name.to_string(),
        profession,
        specializations: specializations.iter().map(|s| s.to_string()).collect(),
        verified: true,
        rating,
        reviews,
        response_time: response_time.to_string(),
        bio: bio.to_string(),
        avatar_url: format!("https://i.pravatar.cc/150?u={id}"),
    }
}

/// The vetted supporter directory.
///
/// The demo supporter account appears here under its account id so that
/// requests addressed to it show up on that supporter's dashboard.
pub fn supporter_directory() -> Vec<Supporter> {
    vec![
        supporter(
            DEMO_SUPPORTER_ID,
            "Dr. Sarah Smith",
            Profession::Therapist,
            &["Trauma Recovery", "Anxiety", "Online Abuse"],
            4.9,
            124,
            "< 2 hours",
            "Licensed clinical psychologist specialising in trauma caused by online abuse and cyberstalking.",
        ),
        supporter(
            "s_lawyer_chen",
            "Michael Chen, Esq.",
            Profession::Lawyer,
            &["Defamation", "Restraining Orders", "Cyber Law"],
            4.8,
            89,
            "< 24 hours",
            "Attorney handling defamation claims and protective orders arising from online harassment.",
        ),
        supporter(
            "s_safety_okafor",
            "Amara Okafor",
            Profession::DigitalSafety,
            &["Account Security", "Doxxing Response", "Privacy Audits"],
            4.7,
            56,
            "< 6 hours",
            "Digital safety specialist who helps lock down accounts and remove exposed personal data.",
        ),
        supporter(
            "s_ngo_rivera",
            "Lucia Rivera",
            Profession::NgoWorker,
            &["Advocacy", "Resource Navigation"],
            4.6,
            41,
            "< 12 hours",
            "Case worker at a non-profit supporting survivors through reporting and recovery.",
        ),
        supporter(
            "s_counselor_patel",
            "Ravi Patel",
            Profession::Counselor,
            &["Crisis Support", "Youth"],
            4.8,
            73,
            "< 4 hours",
            "Crisis counselor experienced with young people facing coordinated harassment.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_directory_ids_are_unique() {
        let directory = supporter_directory();
        let ids: HashSet<_> = directory.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), directory.len());
    }

    #[test]
    fn test_demo_supporter_listed() {
        assert!(supporter_directory().iter().any(|s| s.id == DEMO_SUPPORTER_ID));
    }
}
