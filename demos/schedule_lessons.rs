// Walkthrough: pick recurring lesson days on the calendar and schedule them for a class
use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use chrono::NaiveDate;

use secretaria::models::records::{Course, Person, SchoolClass};
use secretaria::models::selection::SelectionMode;
use secretaria::models::settings::Locale;
use secretaria::services::calendar::CalendarEngine;
use secretaria::services::secretariat::{parse_date, RecordStore, SecretariatService};
use secretaria::ui_terminal::render_month;

fn main() -> Result<()> {
    println!("=== Lesson Scheduling Walkthrough ===\n");

    let mut store = RecordStore::in_memory();
    let mut service = SecretariatService::new(&mut store);

    println!("Step 1: Registering course, class and students...");
    let course = service.create_course(Course::new("Violão", "presencial"))?;
    let class = service.create_class(SchoolClass::new(
        course.id.unwrap_or_default(),
        "Turma A",
        parse_date("2025-03-01")?,
        parse_date("2025-06-30")?,
    ))?;
    let class_id = class.id.unwrap_or_default();
    for name in ["Ana Souza", "Bruno Lima", "Carla Dias"] {
        let person = service.create_person(Person::new(name))?;
        service.enroll(class_id, person.id.unwrap_or_default())?;
    }
    println!("  {} ({} to {})", class.name, class.start_date, class.end_date);

    println!("\nStep 2: Picking every Tuesday of March on the calendar...");
    let published: Rc<RefCell<Vec<NaiveDate>>> = Rc::default();
    let sink = Rc::clone(&published);

    let mut engine = CalendarEngine::new(2025, 3);
    engine.set_mode(SelectionMode::Recurring);
    engine.subscribe(move |dates: &[NaiveDate]| *sink.borrow_mut() = dates.to_vec());
    engine.click(parse_date("2025-03-04")?);

    let today = parse_date("2025-03-01")?;
    print!("{}", render_month(&engine, Locale::PtBr, today));

    println!("\nStep 3: Scheduling the published dates...");
    let dates = published.borrow().clone();
    let lessons = service.schedule_lessons(class_id, &dates)?;
    for lesson in &lessons {
        let sheet = service.lesson_attendance(lesson.id.unwrap_or_default())?;
        println!("  {} - {} pending attendance row(s)", lesson.date, sheet.len());
    }

    println!("\nStep 4: Trying a date after the class ends...");
    match service.schedule_lessons(class_id, &[parse_date("2025-07-01")?]) {
        Ok(_) => println!("  unexpectedly accepted"),
        Err(e) => println!("  rejected: {}", e),
    }

    println!("\n✅ {} lesson(s) scheduled.", service.class_lessons(class_id).len());
    Ok(())
}
