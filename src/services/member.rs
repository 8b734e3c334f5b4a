//! Family member service

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Member, MemberId, MemberRole};
use crate::storage::Storage;

/// Service for family member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a family member. Names are unique, ignoring case.
    pub fn create(&self, name: &str, email: &str, role: MemberRole) -> ExpenseResult<Member> {
        let name = name.trim();
        self.ensure_unique(name, None)?;

        let mut member = Member::new(name, email.trim());
        member.role = role;
        member
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        tracing::info!(id = %member.id, name = %member.name, "member added");
        Ok(member)
    }

    /// Find a member by name or ID string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Member>> {
        if let Some(member) = self.storage.members.get_by_name(identifier)? {
            return Ok(Some(member));
        }
        if let Ok(id) = identifier.trim().parse::<MemberId>() {
            return self.storage.members.get(id);
        }
        let identifier = identifier.trim();
        let mut matches: Vec<Member> = self
            .storage
            .members
            .get_all()?
            .into_iter()
            .filter(|m| m.id.matches_prefix(identifier))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(ExpenseError::Validation(format!(
                "ID '{}' is ambiguous ({} members match)",
                identifier, n
            ))),
        }
    }

    pub fn list(&self) -> ExpenseResult<Vec<Member>> {
        self.storage.members.get_all()
    }

    /// Update a member's details
    pub fn update(
        &self,
        id: MemberId,
        name: Option<&str>,
        email: Option<&str>,
        role: Option<MemberRole>,
    ) -> ExpenseResult<Member> {
        let mut member = self
            .storage
            .members
            .get(id)?
            .ok_or_else(|| ExpenseError::member_not_found(id.to_string()))?;

        if let Some(name) = name {
            let name = name.trim();
            self.ensure_unique(name, Some(id))?;
            member.name = name.to_string();
        }
        if let Some(email) = email {
            member.email = email.trim().to_string();
        }
        if let Some(role) = role {
            member.role = role;
        }

        member
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        tracing::info!(id = %member.id, "member updated");
        Ok(member)
    }

    /// Remove a member. Past expenses keep the payer name.
    pub fn delete(&self, id: MemberId) -> ExpenseResult<Member> {
        let member = self
            .storage
            .members
            .get(id)?
            .ok_or_else(|| ExpenseError::member_not_found(id.to_string()))?;

        self.storage.members.delete(id)?;
        self.storage.members.save()?;

        tracing::info!(id = %member.id, "member removed");
        Ok(member)
    }

    fn ensure_unique(&self, name: &str, except: Option<MemberId>) -> ExpenseResult<()> {
        if let Some(existing) = self.storage.members.get_by_name(name)? {
            if Some(existing.id) != except {
                return Err(ExpenseError::Duplicate {
                    entity_type: "Member",
                    identifier: name.to_string(),
                });
            }
        }
        Ok(())
    }
}
