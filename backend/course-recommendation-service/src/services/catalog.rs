use crate::models::Course;

/// Courses whose title or description contains `query`, ignoring case.
///
/// Input order is kept. An empty query matches every course.
pub fn search_courses(courses: &[Course], query: &str) -> Vec<Course> {
    let needle = query.to_lowercase();
    courses
        .iter()
        .filter(|course| {
            course.title.to_lowercase().contains(&needle)
                || course.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
