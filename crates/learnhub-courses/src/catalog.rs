//! Built-in course catalog and daily topic pool.

use crate::types::{Course, CourseLevel, DailyTopic};

struct CourseSeed {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    photo: &'static str,
    progress: u8,
    category: &'static str,
    duration: &'static str,
    level: CourseLevel,
    tags: &'static [&'static str],
    rating: f64,
    enrolled_count: u32,
    is_recommended: bool,
}

const COURSES: [CourseSeed; 10] = [
    CourseSeed {
        id: "1",
        title: "Introduction to Artificial Intelligence",
        description: "Learn the fundamentals of AI and machine learning algorithms.",
        photo: "photo-1677442135136-760c813028c4",
        progress: 65,
        category: "AI",
        duration: "8 weeks",
        level: CourseLevel::Beginner,
        tags: &["AI", "Machine Learning", "Python"],
        rating: 4.8,
        enrolled_count: 1245,
        is_recommended: true,
    },
    CourseSeed {
        id: "2",
        title: "Web Development Masterclass",
        description: "Comprehensive guide to modern web development techniques.",
        photo: "photo-1547658719-da2b51169166",
        progress: 32,
        category: "Web Development",
        duration: "10 weeks",
        level: CourseLevel::Intermediate,
        tags: &["JavaScript", "React", "Node.js"],
        rating: 4.6,
        enrolled_count: 987,
        is_recommended: false,
    },
    CourseSeed {
        id: "3",
        title: "Data Science Fundamentals",
        description: "Explore data analysis, visualization, and statistical methods.",
        photo: "photo-1551288049-bebda4e38f71",
        progress: 78,
        category: "Data Science",
        duration: "12 weeks",
        level: CourseLevel::Beginner,
        tags: &["Data Analysis", "Python", "Statistics"],
        rating: 4.7,
        enrolled_count: 1532,
        is_recommended: true,
    },
    CourseSeed {
        id: "4",
        title: "Machine Learning Applications",
        description: "Apply ML algorithms to real-world problems and datasets.",
        photo: "photo-1620712943543-bcc4688e7485",
        progress: 45,
        category: "AI",
        duration: "9 weeks",
        level: CourseLevel::Intermediate,
        tags: &["Machine Learning", "Python", "TensorFlow"],
        rating: 4.9,
        enrolled_count: 876,
        is_recommended: true,
    },
    CourseSeed {
        id: "5",
        title: "Mobile App Development",
        description: "Build cross-platform mobile applications with React Native.",
        photo: "photo-1526498460520-4c246339dccb",
        progress: 12,
        category: "Mobile Development",
        duration: "8 weeks",
        level: CourseLevel::Intermediate,
        tags: &["React Native", "JavaScript", "Mobile"],
        rating: 4.5,
        enrolled_count: 654,
        is_recommended: false,
    },
    CourseSeed {
        id: "6",
        title: "Cloud Computing Essentials",
        description: "Master cloud services, deployment models, and architecture.",
        photo: "photo-1544197150-b99a580bb7a8",
        progress: 50,
        category: "Cloud Computing",
        duration: "6 weeks",
        level: CourseLevel::Beginner,
        tags: &["AWS", "Azure", "Cloud"],
        rating: 4.4,
        enrolled_count: 432,
        is_recommended: false,
    },
    CourseSeed {
        id: "7",
        title: "Deep Learning Specialization",
        description: "Master neural networks and deep learning techniques.",
        photo: "photo-1558346490-a72e53ae2d4f",
        progress: 0,
        category: "AI",
        duration: "14 weeks",
        level: CourseLevel::Advanced,
        tags: &["Deep Learning", "Neural Networks", "PyTorch"],
        rating: 4.9,
        enrolled_count: 789,
        is_recommended: true,
    },
    CourseSeed {
        id: "8",
        title: "Cybersecurity Fundamentals",
        description: "Learn essential security concepts and practices.",
        photo: "photo-1563013544-824ae1b704d3",
        progress: 0,
        category: "Security",
        duration: "8 weeks",
        level: CourseLevel::Beginner,
        tags: &["Security", "Networking", "Ethical Hacking"],
        rating: 4.6,
        enrolled_count: 543,
        is_recommended: false,
    },
    CourseSeed {
        id: "9",
        title: "Blockchain Development",
        description: "Build decentralized applications using blockchain technology.",
        photo: "photo-1639762681057-408e52192e55",
        progress: 0,
        category: "Blockchain",
        duration: "10 weeks",
        level: CourseLevel::Intermediate,
        tags: &["Blockchain", "Ethereum", "Smart Contracts"],
        rating: 4.7,
        enrolled_count: 321,
        is_recommended: false,
    },
    CourseSeed {
        id: "10",
        title: "UI/UX Design Principles",
        description: "Create intuitive and engaging user experiences.",
        photo: "photo-1586717791821-3f44a563fa4c",
        progress: 0,
        category: "Design",
        duration: "7 weeks",
        level: CourseLevel::Beginner,
        tags: &["UI", "UX", "Design", "Figma"],
        rating: 4.8,
        enrolled_count: 876,
        is_recommended: true,
    },
];

// (title, description, icon, tags)
const TOPICS: [(&str, &str, &str, &[&str]); 7] = [
    (
        "Machine Learning Fundamentals",
        "Based on your interest in AI and data science",
        "sparkles",
        &["AI", "Machine Learning", "Data Science"],
    ),
    (
        "Advanced React Patterns",
        "Continue your web development journey",
        "book-open",
        &["Web Development", "React", "JavaScript"],
    ),
    (
        "Data Visualization with D3",
        "Complement your frontend skills",
        "bar-chart-2",
        &["Data Science", "Web Development", "JavaScript"],
    ),
    (
        "Neural Networks Architecture",
        "Deepen your understanding of deep learning",
        "activity",
        &["AI", "Deep Learning", "Neural Networks"],
    ),
    (
        "Cloud Deployment Strategies",
        "Learn best practices for cloud applications",
        "cloud",
        &["Cloud Computing", "DevOps"],
    ),
    (
        "Mobile UI Best Practices",
        "Create better mobile experiences",
        "smartphone",
        &["Mobile Development", "UI", "UX"],
    ),
    (
        "Blockchain Fundamentals",
        "Understand the basics of distributed ledgers",
        "link",
        &["Blockchain", "Cryptocurrency"],
    ),
];

fn owned(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

/// The seeded course catalog, in display order.
pub fn mock_courses() -> Vec<Course> {
    COURSES
        .iter()
        .map(|seed| Course {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            thumbnail: format!("https://images.unsplash.com/{}?w=800&q=80", seed.photo),
            progress: seed.progress,
            category: seed.category.to_string(),
            duration: seed.duration.to_string(),
            level: seed.level,
            tags: owned(seed.tags),
            rating: seed.rating,
            enrolled_count: seed.enrolled_count,
            is_recommended: seed.is_recommended,
        })
        .collect()
}

/// The pool daily topics are drawn from.
pub fn daily_topic_pool() -> Vec<DailyTopic> {
    TOPICS
        .iter()
        .map(|(title, description, icon, tags)| DailyTopic {
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            tags: owned(tags),
        })
        .collect()
}
