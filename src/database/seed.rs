use super::models::{CategoryDraft, DrinkDraft, Ingredient, QuestionDraft};

pub fn categories() -> Vec<CategoryDraft> {
    CategoryDraft::defaults()
}

/// Starter questions, referencing the default category ids
pub fn questions() -> Vec<QuestionDraft> {
    let q = |question: &str, answer: &str, category: i32, difficulty: i32| QuestionDraft {
        question: question.to_string(),
        answer: answer.to_string(),
        category,
        difficulty,
    };

    vec![
        q("What is the heaviest organ in the human body?", "The Liver", 1, 4),
        q("Who discovered penicillin?", "Alexander Fleming", 1, 3),
        q("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
        q("Which Dutch graphic artist-initials M C was a creator of optical illusions?", "Escher", 2, 1),
        q("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
        q("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
        q("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
        q("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
        q("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
        q("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
        q("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
        q("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
        q("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
        q("What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
        q("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
        q("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    ]
}

pub fn drinks() -> Vec<DrinkDraft> {
    vec![DrinkDraft {
        title: "water".to_string(),
        recipe: vec![Ingredient {
            name: "water".to_string(),
            color: "blue".to_string(),
            parts: 1,
        }],
    }]
}
