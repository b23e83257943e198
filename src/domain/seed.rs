//! Built-in example content.
//!
//! A fresh installation, or one whose persisted snapshot is missing or corrupt,
//! starts from this deterministic tree: the root plus a few example folders and
//! notes that double as a tour of the markup dialect.

use crate::domain::entity::{EntityId, Folder, Note};
use crate::domain::error::Result;
use crate::domain::store::{ContentStore, ROOT_ID, ROOT_NAME};

/// `(id, name, parent, child folders, child notes)`
type FolderSeed = (
    &'static str,
    &'static str,
    Option<&'static str>,
    &'static [&'static str],
    &'static [&'static str],
);

/// `(id, name, folder, content)`
type NoteSeed = (&'static str, &'static str, &'static str, &'static str);

const FOLDERS: &[FolderSeed] = &[
    (ROOT_ID, ROOT_NAME, None, &["personal", "work"], &["welcome"]),
    ("personal", "Personal", Some(ROOT_ID), &["projects"], &["ideas", "journal"]),
    ("work", "Work", Some(ROOT_ID), &[], &["meetings", "tasks"]),
    ("projects", "Projects", Some("personal"), &[], &["webapp"]),
];

const NOTES: &[NoteSeed] = &[
    (
        "welcome",
        "Welcome to My Notes",
        ROOT_ID,
        "# Welcome to My Notes App! 🎉\n\nThis is your personal note-taking app that works across all your devices.\n\n## Features\n- 📁 **Folders**: Organize your notes\n- ✏️ **Rich editing**: Write in plain text or markdown\n- 👁️ **Preview mode**: See your formatted notes\n- 📱 **Responsive**: Works on mobile and desktop\n\n## Getting Started\n1. Create folders to organize your notes\n2. Add notes to your folders\n3. Switch between edit and preview modes\n\n**Pro tip**: Use markdown syntax like `# headings`, `**bold text**`, and `- bullet points` for rich formatting!\n\n---\n\n*Happy note-taking!* ✨",
    ),
    (
        "ideas",
        "Ideas",
        "personal",
        "# Ideas 💡\n\n- Build a note-taking app ✅\n- Learn a new programming language\n- Start a blog\n- Create a personal website\n- Write more documentation",
    ),
    (
        "journal",
        "Daily Journal",
        "personal",
        "# Daily Journal 📔\n\n## Today\nWorked on the note-taking app. It's coming together nicely!\n\n## Tomorrow\n- Add more features\n- Test on different devices\n- Share with friends",
    ),
    (
        "meetings",
        "Meeting Notes",
        "work",
        "# Meeting Notes 📋\n\n## Weekly Standup - Jan 15\n- Discussed project progress\n- Planned next sprint\n- Resolved blockers\n\n## Action Items\n- [ ] Update documentation\n- [ ] Review pull requests\n- [ ] Schedule follow-up meeting",
    ),
    (
        "tasks",
        "Tasks",
        "work",
        "# Tasks ✅\n\n## High Priority\n- [ ] Fix critical bug\n- [ ] Deploy new feature\n- [ ] Update user documentation\n\n## Medium Priority\n- [ ] Code review\n- [ ] Team meeting prep\n- [ ] Update project timeline\n\n## Low Priority\n- [ ] Organize files\n- [ ] Clean up old branches",
    ),
    (
        "webapp",
        "Web App Ideas",
        "projects",
        "# Web App Ideas 🚀\n\n## Note-Taking App\n- Single HTML file\n- Works offline\n- Multi-device support\n- Markdown support\n- Simple and clean UI\n\n## Features to Add\n- [ ] Export notes\n- [ ] Search functionality\n- [ ] Tags system\n- [ ] Dark mode\n- [ ] Sync between devices",
    ),
];

impl ContentStore {
    /// Builds the default example tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use notecase::domain::{ContentStore, EntityId};
    ///
    /// let store = ContentStore::seeded();
    /// assert_eq!(store.folder_count(), 4);
    /// assert_eq!(store.note_count(), 6);
    /// assert!(store.note(&EntityId::from("welcome")).is_some());
    /// ```
    #[must_use]
    pub fn seeded() -> Self {
        match Self::try_seeded() {
            Ok(store) => store,
            Err(e) => {
                // Only reachable if the constant tables above are edited inconsistently.
                tracing::error!(error = %e, "built-in seed is invalid, starting empty");
                Self::new()
            }
        }
    }

    fn try_seeded() -> Result<Self> {
        let folders = FOLDERS.iter().map(|(id, name, parent, folders, notes)| Folder {
            id: EntityId::from(*id),
            name: (*name).to_string(),
            parent: parent.map(EntityId::from),
            folders: folders.iter().copied().map(EntityId::from).collect(),
            notes: notes.iter().copied().map(EntityId::from).collect(),
        });

        let notes = NOTES.iter().map(|(id, name, folder, content)| Note {
            id: EntityId::from(*id),
            name: (*name).to_string(),
            content: (*content).to_string(),
            folder: EntityId::from(*folder),
        });

        Self::from_parts(folders, notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_a_valid_tree() {
        let store = ContentStore::try_seeded().expect("seed should validate");
        assert!(store.validate().is_ok());
        assert_eq!(store.root_id().as_str(), "root");
    }

    #[test]
    fn seed_keeps_display_order() {
        let store = ContentStore::seeded();
        let children = store.children(store.root_id());
        let folders: Vec<&str> = children.folders.iter().map(|f| f.name.as_str()).collect();
        let notes: Vec<&str> = children.notes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(folders, vec!["Personal", "Work"]);
        assert_eq!(notes, vec!["Welcome to My Notes"]);
    }
}
