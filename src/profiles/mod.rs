//! Installation profile catalog.
//!
//! Each profile is a named bundle of apt packages offered on the package
//! selection screen. The catalog is compiled in and never changes at runtime.
//!
//! | Profile   | Icon                     | Packages |
//! |-----------|--------------------------|----------|
//! | art       | lazpaint                 | 3        |
//! | cyber     | nethack                  | 10       |
//! | designer  | applications-graphics    | 4        |
//! | dev       | applications-development | 3        |
//! | essential | applications-internet    | 4        |
//! | gaming    | applications-games       | 5        |
//! | minimal   | edit-delete              | 2        |
//! | server    | network-server           | 5        |
//! | student   | applications-education   | 10       |
//!
//! Every package entry is a single apt package name. Command synthesis
//! deduplicates and sorts these tokens, so an entry must never carry shell
//! syntax of its own.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Identifier of a compiled-in profile.
///
/// The string form (`Display`/`FromStr`) is the lowercase key used in the
/// selection set and on the command line. Parsing an unknown key fails.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ProfileId {
    Art,
    Cyber,
    Designer,
    Dev,
    Essential,
    Gaming,
    Minimal,
    Server,
    Student,
}

impl ProfileId {
    /// The lowercase key of this profile.
    pub fn key(&self) -> &'static str {
        self.into()
    }
}

/// A named bundle of packages plus its display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub name: &'static str,
    pub description: &'static str,
    /// Freedesktop icon name, kept for graphical embedders.
    pub icon: &'static str,
    /// Package tokens in declared order. Never empty, no empty entries.
    pub packages: &'static [&'static str],
}

const PROFILES: &[Profile] = &[
    Profile {
        id: ProfileId::Minimal,
        name: "Minimal",
        description: "Stripped down current system, only choose this if you have very low storage",
        icon: "edit-delete",
        packages: &["nnn", "zutty"],
    },
    Profile {
        id: ProfileId::Essential,
        name: "Essential",
        description: "Browser, media player and image viewer - Daily use basics",
        icon: "applications-internet",
        packages: &["falkon", "mpv", "qimgv", "qmmp"],
    },
    Profile {
        id: ProfileId::Gaming,
        name: "Gaming",
        description: "Native Linux games - Not recommended for low-end devices",
        icon: "applications-games",
        packages: &["lutris", "xonotic", "teeworlds", "supertux", "supertuxkart"],
    },
    Profile {
        id: ProfileId::Dev,
        name: "Developer",
        description: "Programming tools - 900+ MB download",
        icon: "applications-development",
        packages: &["git", "make", "gcc"],
    },
    Profile {
        id: ProfileId::Art,
        name: "Digital Art",
        description: "Drawing, painting and publishing - 200+ MB download",
        icon: "lazpaint",
        packages: &["inkscape", "krita", "scribus"],
    },
    Profile {
        id: ProfileId::Designer,
        name: "Graphic Designer",
        description: "Photo, video and 3D editing - 500+ MB download",
        icon: "applications-graphics",
        packages: &["gimp", "inkscape", "kdenlive", "blender"],
    },
    Profile {
        id: ProfileId::Server,
        name: "File Server",
        description: "Samba file sharing setup - 200+ MB download",
        icon: "network-server",
        packages: &[
            "samba",
            "samba-common-bin",
            "kdenetwork-filesharing",
            "dolphin-plugins",
            "smb4k",
        ],
    },
    Profile {
        id: ProfileId::Student,
        name: "Student",
        description: "Study tools and productivity apps - 1.2+ GB download",
        icon: "applications-education",
        packages: &[
            "libreoffice",
            "chromium",
            "okular",
            "octave",
            "anki",
            "thunderbird",
            "vlc",
            "obs-studio",
            "kalzium",
            "kstars",
        ],
    },
    Profile {
        id: ProfileId::Cyber,
        name: "Cyber security",
        description: "For security experts, hackers and exploiters",
        icon: "nethack",
        packages: &[
            "nmap",
            "wireshark",
            "john",
            "hydra",
            "sqlmap",
            "metasploit-framework",
            "burpsuite",
            "aircrack-ng",
            "hashcat",
            "gobuster",
        ],
    },
];

/// Static table of all profiles.
///
/// Zero-sized; every instance reads the same compiled-in data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileCatalog;

impl ProfileCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Look up a profile by id. Every `ProfileId` has exactly one entry.
    pub fn get(&self, id: ProfileId) -> &'static Profile {
        PROFILES
            .iter()
            .find(|p| p.id == id)
            .unwrap_or_else(|| unreachable!("profile table is missing {}", id))
    }

    /// Look up a profile by its string key. Unknown keys yield `None`.
    pub fn lookup(&self, key: &str) -> Option<&'static Profile> {
        key.parse::<ProfileId>().ok().map(|id| self.get(id))
    }

    /// All profiles, in ascending order of their id key.
    ///
    /// This is the order the selection screen lists them in.
    pub fn all(&self) -> Vec<&'static Profile> {
        let mut profiles: Vec<&'static Profile> = PROFILES.iter().collect();
        profiles.sort_by(|a, b| a.id.key().cmp(b.id.key()));
        profiles
    }

    pub fn len(&self) -> usize {
        PROFILES.len()
    }

    pub fn is_empty(&self) -> bool {
        PROFILES.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_id_has_exactly_one_profile() {
        for id in ProfileId::iter() {
            let count = PROFILES.iter().filter(|p| p.id == id).count();
            assert_eq!(count, 1, "{} should appear once", id);
        }
        assert_eq!(PROFILES.len(), ProfileId::iter().count());
    }

    #[test]
    fn test_key_matches_strum_serialization() {
        for id in ProfileId::iter() {
            assert_eq!(id.key(), id.to_string());
            assert_eq!(id.key(), id.as_ref());
            assert_eq!(id.key().parse::<ProfileId>().ok(), Some(id));
        }
        assert_eq!(ProfileId::Dev.key(), "dev");
        assert_eq!(ProfileId::Essential.key(), "essential");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let catalog = ProfileCatalog::new();
        assert!(catalog.lookup("office").is_none());
        assert!(catalog.lookup("Essential").is_none());
        assert!(catalog.lookup("").is_none());
    }

    #[test]
    fn test_packages_are_plain_tokens() {
        for profile in PROFILES {
            assert!(!profile.packages.is_empty(), "{} has no packages", profile.id);
            for pkg in profile.packages {
                assert!(!pkg.is_empty());
                assert!(
                    !pkg.contains(char::is_whitespace) && !pkg.contains('&'),
                    "{} has non-package token {:?}",
                    profile.id,
                    pkg
                );
            }
            let unique: HashSet<_> = profile.packages.iter().collect();
            assert_eq!(unique.len(), profile.packages.len());
        }
    }

    #[test]
    fn test_all_is_sorted_by_key() {
        let catalog = ProfileCatalog::new();
        let keys: Vec<&str> = catalog.all().iter().map(|p| p.id.key()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.first(), Some(&"art"));
        assert_eq!(keys.last(), Some(&"student"));
    }

    #[test]
    fn test_essential_packages() {
        let catalog = ProfileCatalog::new();
        let essential = catalog.get(ProfileId::Essential);
        assert_eq!(essential.name, "Essential");
        assert_eq!(essential.packages, &["falkon", "mpv", "qimgv", "qmmp"]);
    }
}
