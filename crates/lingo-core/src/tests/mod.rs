mod vocabulary_tests;
