//! Built-in posts and projects.

use crate::models::{BlogPost, Project};

/// Read-only content the views list and the view controller opens.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    posts: Vec<BlogPost>,
    projects: Vec<Project>,
}

impl Catalog {
    pub fn new(posts: Vec<BlogPost>, projects: Vec<Project>) -> Self {
        Self { posts, projects }
    }

    /// The content shipped with the site.
    pub fn builtin() -> Self {
        Self::new(builtin_posts(), builtin_projects())
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn post(&self, id: &str) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects shown in the home gallery.
    pub fn featured_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn builtin_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: "1".into(),
            title: "Optimizing React for Low-End Devices: What No One Tells You".into(),
            excerpt: "How I stopped React from choking on animations by ditching state and letting the GPU do real work.".into(),
            date: "Oct 24, 2024".into(),
            read_time: "9 min read".into(),
            tags: tags(&["React", "Performance", "Animation"]),
            content: r#"
# Why React Struggles on Cheap Hardware

Most apps get tested on a fast laptop and called smooth.

The biggest culprit is **state-driven animations**.

---

# Let the GPU Do the Heavy Lifting

```ts
const x = useMotionValue(0);
x.set(120);
```

- CPU usage dropped **60%**
- Janky scroll effects turned smooth
"#
            .into(),
        },
        BlogPost {
            id: "2".into(),
            title: "Why I Switched from VS Code to Neovim (and Never Looked Back)".into(),
            excerpt: "VS Code slowed me down. Neovim made me faster. Here's how Lua, motions, and terminal workflows rewired my brain.".into(),
            date: "Nov 02, 2024".into(),
            read_time: "11 min read".into(),
            tags: tags(&["Linux", "Neovim", "Productivity"]),
            content: r#"
# VS Code Was Comfortable

The biggest problem wasn't performance. It was **workflow friction**.

---

# Lua Made Configuration Fun

### Telescope
Fuzzy finder, file navigator, grep tool.

### Harpoon
Instant jumps to the most-used files.

---

# Terminal-Centric Dev

- Neovim
- API logs
- Database shell
"#
            .into(),
        },
        BlogPost {
            id: "4".into(),
            title: "How I Turned a Raspberry Pi Into a Full Dev Machine (And Why It Shocked Me)".into(),
            excerpt: "I tried using a Raspberry Pi as a real development workstation. Spoiler: it handled way more than I expected.".into(),
            date: "Dec 01, 2024".into(),
            read_time: "10 min read".into(),
            tags: tags(&["Raspberry Pi", "Linux", "ARM", "Hardware"]),
            content: r#"
# Why Even Try This?

> You can't use a Raspberry Pi as a dev machine.

Challenge accepted.

---

# What I Built on It

- A Go API
- A tiny React dashboard
- A local network monitor using Rust
"#
            .into(),
        },
    ]
}

fn builtin_projects() -> Vec<Project> {
    vec![
        Project {
            id: "1".into(),
            title: "Tower of Mordoria".into(),
            description: "A 2D Tower Defense Game.".into(),
            tech: tags(&["Java", "libGDX", "Tiled"]),
            link: "https://github.com/AimalShah/tower-of-mordoria".into(),
            image: "/assets/images/tower.png".into(),
            year: "2025".into(),
            featured: true,
        },
        Project {
            id: "2".into(),
            title: "Techno-CMS".into(),
            description: "Campus Management System for TechnoSphereX.".into(),
            tech: tags(&["Nextjs", "PostgreSQL", "Neon", "DrizzleORM"]),
            link: "https://github.com/AimalShah/techno-cms".into(),
            image: "/assets/images/techno.jpeg".into(),
            year: "2025".into(),
            featured: true,
        },
        Project {
            id: "3".into(),
            title: "404-Studio Landing Page".into(),
            description: "Landing page for a creative studio.".into(),
            tech: tags(&["NextJs", "Tailwind", "Framer Motion"]),
            link: "https://github.com/AimalShah/404-studios".into(),
            image: "/assets/images/404-studio.png".into(),
            year: "2025".into(),
            featured: true,
        },
        Project {
            id: "4".into(),
            title: "Khalid Zarar Portfolio".into(),
            description: "A portfolio project of video editor.".into(),
            tech: tags(&["React", "Framer Motion"]),
            link: "https://github.com/AimalShah/portfolio-project".into(),
            image: "/assets/images/portfolio-project.png".into(),
            year: "2024".into(),
            featured: false,
        },
    ]
}
