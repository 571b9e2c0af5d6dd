//! Grant listings and the MySQL privilege vocabulary

/// Privilege names that can appear in a `SHOW GRANTS` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Privilege {
    /// Full access (expands to all privileges)
    All,
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    Alter,
    Index,
}

impl Privilege {
    /// Text of this privilege as printed in a grant statement
    pub fn to_str(&self) -> &'static str {
        match self {
            Privilege::All => "ALL PRIVILEGES",
            Privilege::Select => "SELECT",
            Privilege::Insert => "INSERT",
            Privilege::Update => "UPDATE",
            Privilege::Delete => "DELETE",
            Privilege::Create => "CREATE",
            Privilege::Drop => "DROP",
            Privilege::Alter => "ALTER",
            Privilege::Index => "INDEX",
        }
    }

    /// Individual privileges that together amount to ALL
    pub fn expand_all() -> Vec<Privilege> {
        vec![
            Privilege::Select,
            Privilege::Insert,
            Privilege::Update,
            Privilege::Delete,
            Privilege::Create,
            Privilege::Drop,
            Privilege::Alter,
            Privilege::Index,
        ]
    }

    /// Privileges a read-only principal must not hold
    pub fn write_privileges() -> Vec<Privilege> {
        vec![
            Privilege::Insert,
            Privilege::Update,
            Privilege::Delete,
            Privilege::Drop,
            Privilege::Create,
            Privilege::All,
        ]
    }
}

/// Grant statements for one principal, in `SHOW GRANTS` order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantList {
    grants: Vec<String>,
}

impl GrantList {
    /// Parse `SHOW GRANTS` output, dropping the `Grants for ...` header and blank lines
    pub fn parse(output: &str) -> Self {
        let grants = output
            .split('\n')
            .filter(|line| !line.starts_with("Grants"))
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        GrantList { grants }
    }

    /// All grants, one per line (used as failure details)
    pub fn joined(&self) -> String {
        self.grants.join("\n")
    }

    fn any_grant_mentions(&self, privilege: Privilege) -> bool {
        self.grants
            .iter()
            .any(|grant| grant.to_uppercase().contains(privilege.to_str()))
    }

    /// ALL PRIVILEGES, either literally or as the full set of individual privileges
    pub fn has_all_privileges(&self) -> bool {
        let literal = self.grants.iter().any(|grant| {
            let grant = grant.to_uppercase();
            grant.contains("ALL PRIVILEGES") || grant.contains("GRANT ALL")
        });
        literal
            || Privilege::expand_all()
                .into_iter()
                .all(|p| self.any_grant_mentions(p))
    }

    /// Some grant names both `privilege` and `database`
    pub fn has_privilege_on(&self, privilege: Privilege, database: &str) -> bool {
        self.grants.iter().any(|grant| {
            grant.to_uppercase().contains(privilege.to_str()) && grant.contains(database)
        })
    }

    /// Write privileges present in any grant, excluding the `allowed` ones
    pub fn write_privileges_beyond(&self, allowed: &[Privilege]) -> Vec<Privilege> {
        Privilege::write_privileges()
            .into_iter()
            .filter(|p| !allowed.contains(p))
            .filter(|p| self.any_grant_mentions(*p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_grants() {
        let output = "Grants for user_0d_2@localhost\n\
            GRANT USAGE ON *.* TO `user_0d_2`@`localhost`\n\
            \n\
            GRANT SELECT ON `hbtn_0d_2`.* TO `user_0d_2`@`localhost`\n";
        let grants = GrantList::parse(output);
        assert_eq!(
            grants.joined(),
            "GRANT USAGE ON *.* TO `user_0d_2`@`localhost`\n\
             GRANT SELECT ON `hbtn_0d_2`.* TO `user_0d_2`@`localhost`"
        );
        assert!(grants.has_privilege_on(Privilege::Select, "hbtn_0d_2"));
        assert!(!grants.has_privilege_on(Privilege::Select, "hbtn_0d_usa"));
        assert!(grants
            .write_privileges_beyond(&[Privilege::Select])
            .is_empty());
        assert!(!grants.has_all_privileges());
    }

    #[test]
    fn test_all_privileges_literal() {
        let grants =
            GrantList::parse("Grants for u\nGRANT ALL PRIVILEGES ON *.* TO `user_0d_1`@`localhost`\n");
        assert!(grants.has_all_privileges());
        assert_eq!(
            grants.write_privileges_beyond(&[Privilege::Select]),
            vec![Privilege::All]
        );
    }

    #[test]
    fn test_all_privileges_expanded() {
        // MySQL 8 lists every static privilege instead of ALL PRIVILEGES
        let grants = GrantList::parse(
            "Grants for u\n\
             GRANT SELECT, INSERT, UPDATE, DELETE, CREATE, DROP, RELOAD, ALTER, INDEX ON *.* TO `u`@`localhost`\n",
        );
        assert!(grants.has_all_privileges());

        let partial = GrantList::parse("Grants for u\nGRANT SELECT, INSERT ON *.* TO `u`@`localhost`\n");
        assert!(!partial.has_all_privileges());
        assert_eq!(
            partial.write_privileges_beyond(&[Privilege::Select]),
            vec![Privilege::Insert]
        );
    }
}
