//! Canned exercises and grading results served in development mode when
//! the AI provider fails. Production never uses these.

use crate::schema::*;

pub fn chinese_writing_topic() -> ChineseWritingTopic {
    ChineseWritingTopic {
        title: "我最难忘的一件事".into(),
        kind: "记叙文".into(),
        description: "请回忆一件令你印象深刻的事情，可以是开心的、感动的、或者让你学到东西的经历。用具体的细节描写当时的场景和你的感受。".into(),
        requirements: "1. 事件要有完整的起因、经过、结果\n2. 要有具体的细节描写（环境、人物、对话等）\n3. 结尾要表达你的感悟或收获".into(),
        word_count: WordCount { min: 300, max: 500 },
    }
}

pub fn english_writing_topic() -> EnglishWritingTopic {
    EnglishWritingTopic {
        title: "My Best Friend".into(),
        title_cn: "我最好的朋友".into(),
        kind: "narrative".into(),
        description: "Write about your best friend. Describe what they look like, what you like to do together, and why they are important to you.".into(),
        description_cn: "写一篇关于你最好的朋友的文章。描述他们的外貌，你们喜欢一起做什么，以及为什么他们对你很重要。".into(),
        requirements: "1. Include at least 3 descriptive adjectives\n2. Use at least 2 different tenses\n3. End with a conclusion about friendship".into(),
        word_count: WordCount { min: 80, max: 120 },
        useful_expressions: vec![
            "be fond of".into(),
            "get along well with".into(),
            "have ... in common".into(),
        ],
    }
}

pub fn classical_passage() -> ClassicalPassage {
    let annotation = |word: &str, meaning: &str| Annotation {
        word: word.into(),
        meaning: meaning.into(),
    };

    ClassicalPassage {
        title: "陋室铭".into(),
        author: "刘禹锡".into(),
        dynasty: "唐".into(),
        original_text: "山不在高，有仙则名。水不在深，有龙则灵。斯是陋室，惟吾德馨。苔痕上阶绿，草色入帘青。谈笑有鸿儒，往来无白丁。可以调素琴，阅金经。无丝竹之乱耳，无案牍之劳形。南阳诸葛庐，西蜀子云亭。孔子云：何陋之有？".into(),
        annotations: vec![
            annotation("名", "出名，著名（名词用作动词）"),
            annotation("灵", "灵验，神奇"),
            annotation("德馨", "品德高尚"),
            annotation("鸿儒", "博学的人"),
            annotation("白丁", "没有学问的人"),
            annotation("案牍", "官府的文书"),
        ],
        questions: vec![
            ClassicalQuestion {
                id: 1,
                kind: "word_explain".into(),
                question: "解释\"斯是陋室，惟吾德馨\"中\"馨\"的含义。".into(),
                answer: "馨：散布很远的香气，这里指品德高尚。".into(),
                analysis: "\"馨\"的本义是香气，在这里是比喻义，用来形容品德的高尚。".into(),
            },
            ClassicalQuestion {
                id: 2,
                kind: "sentence_translate".into(),
                question: "翻译\"苔痕上阶绿，草色入帘青。\"".into(),
                answer: "苔藓的痕迹蔓延到台阶上，使台阶变绿了；草的颜色映入门帘，使门帘也显得青翠。".into(),
                analysis: "注意\"上\"和\"入\"是动词，表示苔痕向上蔓延、草色映入的动态之美。".into(),
            },
            ClassicalQuestion {
                id: 3,
                kind: "comprehension".into(),
                question: "作者用哪些方面来描写陋室的不陋？请结合原文简要分析。".into(),
                answer: "自然环境优美；交往之人高雅；生活情趣高雅。".into(),
                analysis: "需要从环境、人物、活动三个方面进行归纳。".into(),
            },
        ],
    }
}

pub fn english_passage() -> EnglishPassage {
    let choice = |id: u32, question: &str, options: [&str; 4], answer: &str, evidence: &str| {
        EnglishQuestion {
            id,
            kind: "multiple_choice".into(),
            question: question.into(),
            options: Some(options.iter().map(|o| o.to_string()).collect()),
            answer: answer.into(),
            analysis: format!("根据原文 \"{}\" 可以找到答案。", evidence),
            evidence: evidence.into(),
        }
    };

    EnglishPassage {
        title: "A Special School Garden".into(),
        topic: "campus".into(),
        passage: "Last spring, our school decided to create a garden behind the library. At first, many students didn't think it was a good idea. \"We don't know anything about gardening,\" said my classmate Li Ming. But our science teacher, Ms. Wang, encouraged us to try.\n\nWe started by clearing the land and planting some vegetables and flowers. Every week, different classes took turns watering the plants and pulling weeds.\n\nBy summer, our garden was full of tomatoes, cucumbers, and beautiful sunflowers. The best part was that we used the vegetables in our school cafeteria.\n\nNow, the garden has become the most popular place in our school. Ms. Wang says we learned more from the garden than from any textbook.".into(),
        word_count: 130,
        questions: vec![
            choice(
                1,
                "Where was the school garden created?",
                ["A. In front of the school", "B. Behind the library", "C. Next to the playground", "D. On the rooftop"],
                "B",
                "our school decided to create a garden behind the library",
            ),
            choice(
                2,
                "How did Li Ming feel about the garden plan at first?",
                ["A. Excited", "B. Happy", "C. Doubtful", "D. Angry"],
                "C",
                "We don't know anything about gardening",
            ),
            EnglishQuestion {
                id: 3,
                kind: "fill_blank".into(),
                question: "The vegetables from the garden were used in the school _____.".into(),
                options: None,
                answer: "cafeteria".into(),
                analysis: "根据原文 \"we used the vegetables in our school cafeteria\"。".into(),
                evidence: "we used the vegetables in our school cafeteria".into(),
            },
        ],
        vocabulary: vec![
            VocabularyItem {
                word: "encourage".into(),
                phonetic: "/ɪnˈkɜːrɪdʒ/".into(),
                meaning: "鼓励".into(),
                example: "The teacher encouraged us to try new things.".into(),
            },
            VocabularyItem {
                word: "popular".into(),
                phonetic: "/ˈpɒpjʊlər/".into(),
                meaning: "受欢迎的".into(),
                example: "This game is very popular among students.".into(),
            },
        ],
    }
}

fn dimension(name: &str, score: f64, comment: &str) -> Dimension {
    Dimension {
        name: name.into(),
        score,
        comment: comment.into(),
    }
}

pub fn chinese_essay_grading() -> ChineseEssayGrading {
    ChineseEssayGrading {
        total_score: 82.0,
        grade: "B".into(),
        summary: "作文整体不错，内容真实感人，结构也比较完整。继续加油！".into(),
        dimensions: vec![
            dimension("内容与立意", 85.0, "选材贴近生活，情感真实，立意明确。可以尝试更深层次的思考。"),
            dimension("结构与逻辑", 80.0, "段落划分合理，开头结尾呼应。中间过渡可以更自然一些。"),
            dimension("语言表达", 82.0, "语言通顺流畅，有一些好的词句运用。可以多使用一些修辞手法。"),
            dimension("字词运用", 80.0, "用词基本准确，注意个别字词的规范书写。"),
        ],
        suggestions: vec![
            "开头可以尝试用场景描写或对话来引入，更有代入感".into(),
            "多运用比喻、拟人等修辞手法让文章更生动".into(),
            "结尾的感悟可以再深入一些，不要泛泛而谈".into(),
        ],
        rewrite_example: "例如原文\"那天天气很好\"可以改为\"阳光透过树叶的缝隙，在地上洒下斑驳的光影。\"".into(),
    }
}

pub fn english_essay_grading() -> EnglishEssayGrading {
    EnglishEssayGrading {
        total_score: 78.0,
        grade: "B".into(),
        summary: "文章整体不错！内容切题，表达较为清晰。注意一些语法细节可以让你的作文更出色。".into(),
        dimensions: vec![
            dimension("内容与切题", 82.0, "内容紧扣主题，描述较为具体。可以多加一些个人感受。"),
            dimension("语法与准确性", 72.0, "存在一些语法错误，特别是时态和主谓一致方面需要注意。"),
            dimension("词汇与表达", 78.0, "词汇使用基本正确，建议尝试使用更多高级词汇和短语。"),
            dimension("结构与连贯", 80.0, "段落结构清晰，建议多使用连接词让文章更顺畅。"),
        ],
        grammar_errors: vec![
            GrammarError {
                original: "He go to school".into(),
                corrected: "He goes to school".into(),
                rule: "第三人称单数现在时需要加-s".into(),
            },
            GrammarError {
                original: "I am play".into(),
                corrected: "I am playing".into(),
                rule: "现在进行时用 be + doing".into(),
            },
        ],
        suggestions: vec![
            "多使用连接词如 however, moreover, in addition 等".into(),
            "注意第三人称单数动词加 -s".into(),
            "结尾段可以总结全文观点，给读者留下深刻印象".into(),
        ],
        rewrite_example: "My best friend Tom is a kind and humorous boy. We have been friends since primary school.".into(),
    }
}

/// Classical answers longer than five characters count as close enough.
pub fn classical_item(student_answer: &str, reference_answer: &str) -> ItemGrading {
    let close = student_answer.chars().count() > 5;
    ItemGrading {
        score: if close { 75.0 } else { 40.0 },
        is_correct: close,
        comment: if close {
            "答案基本正确，抓住了关键要点。建议表述可以更加准确完整。".into()
        } else {
            "答案不够完整，建议重新阅读原文，注意关键字词的含义。".into()
        },
        correct_answer: reference_answer.into(),
        key_points: Some(vec!["理解原文关键字词".into(), "注意句式结构".into()]),
        explanation: None,
    }
}

/// English answers must match the key, ignoring case and surrounding space.
pub fn english_item(student_answer: &str, correct_answer: &str) -> ItemGrading {
    let correct = student_answer.trim().to_lowercase() == correct_answer.trim().to_lowercase();
    ItemGrading {
        score: if correct { 100.0 } else { 0.0 },
        is_correct: correct,
        comment: if correct {
            "回答正确！很棒！".into()
        } else {
            "答案不正确，请仔细阅读原文相关段落。".into()
        },
        correct_answer: correct_answer.into(),
        key_points: None,
        explanation: Some(if correct {
            "你准确找到了原文对应的信息。".into()
        } else {
            "建议重新阅读原文，注意关键词和细节。".into()
        }),
    }
}
